//! Stateless HTTP request builder and response parser for `/users`.
//!
//! `UsersClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the caller does the round-trip.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::User;

/// Base URL the exercise's demonstrators talk to.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct UsersClient {
    base_url: String,
}

impl Default for UsersClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/users", self.base_url))
    }

    pub fn build_get_user(&self, id: u64) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/users/{id}", self.base_url))
    }

    pub fn build_create_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, format!("{}/users", self.base_url), user)
    }

    /// `PUT` replaces the whole resource, so it takes a full `User`.
    pub fn build_replace_user(&self, id: u64, user: &User) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("{}/users/{id}", self.base_url), user)
    }

    pub fn build_delete_user(&self, id: u64) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("{}/users/{id}", self.base_url))
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 201)?;
        decode(&response)
    }

    pub fn parse_replace_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    /// Any 2xx counts as deleted. The body carries no contract and is
    /// ignored; the status is returned for logging.
    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<u16, ApiError> {
        if response.is_success() {
            return Ok(response.status);
        }
        Err(status_error(response))
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json(&self, method: HttpMethod, path: String, user: &User) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(user).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(status_error(response.clone()))
}

fn status_error(response: HttpResponse) -> ApiError {
    if response.status == 404 {
        return ApiError::NotFound;
    }
    ApiError::Http {
        status: response.status,
        body: response.body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UsersClient {
        UsersClient::new("http://localhost:8000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = client().build_list_users();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/users");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_user_produces_correct_request() {
        let req = client().build_get_user(11);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/users/11");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_user_produces_correct_request() {
        let user = User::new(11, "Rki0", "Pak Ki-young");
        let req = client().build_create_user(&user).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/users");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 11);
        assert_eq!(body["username"], "Rki0");
        assert_eq!(body["name"], "Pak Ki-young");
    }

    #[test]
    fn build_replace_user_targets_path_id() {
        let user = User::new(11, "tolip", "R");
        let req = client().build_replace_user(11, &user).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8000/users/11");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "tolip");
    }

    #[test]
    fn build_delete_user_has_no_body() {
        let req = client().build_delete_user(11);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8000/users/11");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_users_success() {
        let users = client()
            .parse_list_users(response(200, r#"[{"id":1,"username":"Bret","name":"Leanne Graham"}]"#))
            .unwrap();
        assert_eq!(users, vec![User::new(1, "Bret", "Leanne Graham")]);
    }

    #[test]
    fn parse_list_users_bad_json() {
        let err = client().parse_list_users(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_get_user_not_found() {
        let err = client().parse_get_user(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_user_wrong_status() {
        let err = client().parse_create_user(response(409, "")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 409, .. }));
    }

    #[test]
    fn parse_replace_user_success() {
        let user = client()
            .parse_replace_user(response(200, r#"{"id":11,"username":"tolip","name":"R"}"#))
            .unwrap();
        assert_eq!(user, User::new(11, "tolip", "R"));
    }

    #[test]
    fn parse_delete_user_accepts_any_2xx() {
        assert_eq!(client().parse_delete_user(response(204, "")).unwrap(), 204);
        assert_eq!(client().parse_delete_user(response(200, "{}")).unwrap(), 200);
    }

    #[test]
    fn parse_delete_user_not_found() {
        let err = client().parse_delete_user(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = UsersClient::new("http://localhost:8000/").build_list_users();
        assert_eq!(req.path, "http://localhost:8000/users");
    }

    #[test]
    fn default_points_at_localhost_8000() {
        assert_eq!(UsersClient::default().base_url(), "http://localhost:8000");
    }
}
