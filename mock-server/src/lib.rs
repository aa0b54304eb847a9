use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
}

/// Body of `POST /users`. The id is optional; the server assigns the next
/// free one when it is missing.
#[derive(Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    pub name: String,
}

/// Body of `PUT /users/{id}`. An `id` field in the body is accepted but the
/// path id always wins.
#[derive(Deserialize)]
pub struct ReplaceUser {
    pub username: String,
    pub name: String,
}

pub type Db = Arc<RwLock<BTreeMap<u64, User>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-populated with `users`.
pub fn app_with(users: Vec<User>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        users.into_iter().map(|user| (user.id, user)).collect(),
    ));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(replace_user).delete(delete_user))
        .with_state(db)
}

/// A handful of users so a fresh server has something to list.
pub fn fixtures() -> Vec<User> {
    [
        (1, "Bret", "Leanne Graham"),
        (2, "Antonette", "Ervin Howell"),
        (3, "Samantha", "Clementine Bauch"),
    ]
    .into_iter()
    .map(|(id, username, name)| User {
        id,
        username: username.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, users: Vec<User>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(users)).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let users = db.read().await;
    tracing::debug!(count = users.len(), "list users");
    Json(users.values().cloned().collect())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), StatusCode> {
    let mut users = db.write().await;
    let id = match input.id {
        Some(id) if users.contains_key(&id) => {
            tracing::warn!(id, "create rejected, id already taken");
            return Err(StatusCode::CONFLICT);
        }
        Some(id) => id,
        None => match users.keys().next_back() {
            None => 1,
            Some(last) => last.checked_add(1).ok_or_else(|| {
                tracing::warn!("create rejected, id space exhausted");
                StatusCode::INSUFFICIENT_STORAGE
            })?,
        },
    };
    let user = User {
        id,
        username: input.username,
        name: input.name,
    };
    users.insert(id, user.clone());
    tracing::info!(id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ReplaceUser>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.write().await;
    let user = users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    user.username = input.username;
    user.name = input.name;
    tracing::info!(id, "user replaced");
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut users = db.write().await;
    let removed = users.remove(&id).map(|_| StatusCode::NO_CONTENT);
    if removed.is_some() {
        tracing::info!(id, "user deleted");
    }
    removed.ok_or(StatusCode::NOT_FOUND)
}
