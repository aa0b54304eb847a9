//! One-shot verb demonstrators against `/users`.
//!
//! Each `Demonstrator` is one build → execute → parse round-trip with a fixed
//! payload. The host supplies the network through `Transport`; nothing here
//! retries, times out or cancels.

use std::thread;

use crate::client::UsersClient;
use crate::error::{DemoError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::User;

/// Id the POST/PUT/DELETE demonstrators operate on.
pub const DEMO_USER_ID: u64 = 11;

/// Executes an `HttpRequest` on behalf of the core.
///
/// Implementations must return non-2xx statuses as data; only failures to
/// obtain a response at all are errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demonstrator {
    Get,
    Post,
    Put,
    Delete,
}

impl Demonstrator {
    pub const ALL: [Demonstrator; 4] = [
        Demonstrator::Get,
        Demonstrator::Post,
        Demonstrator::Put,
        Demonstrator::Delete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Demonstrator::Get => "Get",
            Demonstrator::Post => "Post",
            Demonstrator::Put => "Put",
            Demonstrator::Delete => "Delete",
        }
    }

    pub fn run(
        self,
        client: &UsersClient,
        transport: &impl Transport,
    ) -> Result<Outcome, DemoError> {
        let outcome = match self {
            Demonstrator::Get => {
                let response = transport.execute(client.build_list_users())?;
                Outcome::Listed(client.parse_list_users(response)?)
            }
            Demonstrator::Post => {
                let request = client.build_create_user(&posted_user())?;
                Outcome::Created(client.parse_create_user(transport.execute(request)?)?)
            }
            Demonstrator::Put => {
                let request = client.build_replace_user(DEMO_USER_ID, &replacement_user())?;
                Outcome::Replaced(client.parse_replace_user(transport.execute(request)?)?)
            }
            Demonstrator::Delete => {
                let response = transport.execute(client.build_delete_user(DEMO_USER_ID))?;
                Outcome::Deleted {
                    status: client.parse_delete_user(response)?,
                }
            }
        };
        Ok(outcome)
    }
}

/// Payload sent by the POST demonstrator.
pub fn posted_user() -> User {
    User::new(DEMO_USER_ID, "Rki0", "Pak Ki-young")
}

/// Payload sent by the PUT demonstrator.
pub fn replacement_user() -> User {
    User::new(DEMO_USER_ID, "tolip", "R")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed(Vec<User>),
    Created(User),
    Replaced(User),
    Deleted { status: u16 },
}

/// What the GET demonstrator shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListView {
    Loading,
    Loaded(Vec<User>),
    Failed,
}

impl UserListView {
    /// Starts a load and returns the settled view. Called again to reload.
    pub fn load(client: &UsersClient, transport: &impl Transport) -> Self {
        match Demonstrator::Get.run(client, transport) {
            Ok(Outcome::Listed(users)) => UserListView::Loaded(users),
            Ok(other) => {
                tracing::error!(?other, "unexpected outcome for user list");
                UserListView::Failed
            }
            Err(e) => {
                tracing::error!("user list failed: {e}");
                UserListView::Failed
            }
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            UserListView::Loading => vec!["Loading...".to_string()],
            UserListView::Loaded(users) => users.iter().map(User::to_string).collect(),
            UserListView::Failed => vec!["Error!!!".to_string()],
        }
    }
}

/// Runs every demonstrator exactly once, each on its own thread. Results
/// come back in `Demonstrator::ALL` order; completion order is unspecified.
pub fn run_once<T: Transport + Sync>(
    client: &UsersClient,
    transport: &T,
) -> Vec<(Demonstrator, Result<Outcome, DemoError>)> {
    thread::scope(|scope| {
        let handles: Vec<_> = Demonstrator::ALL
            .into_iter()
            .map(|demo| {
                (
                    demo,
                    scope.spawn(move || {
                        let result = demo.run(client, transport);
                        log_result(demo, &result);
                        result
                    }),
                )
            })
            .collect();

        handles
            .into_iter()
            .map(|(demo, handle)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(DemoError::Transport(TransportError(format!(
                        "{} demonstrator panicked",
                        demo.name()
                    ))))
                });
                (demo, result)
            })
            .collect()
    })
}

fn log_result(demo: Demonstrator, result: &Result<Outcome, DemoError>) {
    match result {
        Ok(Outcome::Listed(users)) => {
            tracing::info!(demo = demo.name(), count = users.len(), "users loaded");
        }
        Ok(Outcome::Created(user) | Outcome::Replaced(user)) => {
            tracing::info!(demo = demo.name(), ?user, "response payload");
        }
        Ok(Outcome::Deleted { status }) => {
            tracing::info!(demo = demo.name(), status, "delete acknowledged");
        }
        Err(e) => tracing::error!(demo = demo.name(), "{e}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::HttpMethod;

    /// Answers with canned responses and records what it was asked.
    struct Canned {
        status: u16,
        body: String,
        seen: Mutex<Vec<(HttpMethod, String)>>,
    }

    impl Canned {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push((request.method, request.path));
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.clone(),
            })
        }
    }

    struct Offline;

    impl Transport for Offline {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError("connection refused".to_string()))
        }
    }

    /// Routes by method the way a well-behaved server would.
    struct Echo;

    impl Transport for Echo {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let (status, body) = match request.method {
                HttpMethod::Get => (200, r#"[{"id":1,"username":"Bret","name":"Leanne Graham"}]"#.to_string()),
                HttpMethod::Post => (201, request.body.unwrap_or_default()),
                HttpMethod::Put => (200, request.body.unwrap_or_default()),
                HttpMethod::Delete => (204, String::new()),
            };
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            })
        }
    }

    fn client() -> UsersClient {
        UsersClient::new("http://localhost:8000")
    }

    #[test]
    fn get_renders_username_and_name() {
        let transport = Canned::new(200, r#"[{"id":1,"username":"Bret","name":"Leanne Graham"}]"#);
        let view = UserListView::load(&client(), &transport);
        assert_eq!(view.lines(), vec!["Bret (Leanne Graham)".to_string()]);
        assert_eq!(
            transport.seen.lock().unwrap().as_slice(),
            &[(HttpMethod::Get, "http://localhost:8000/users".to_string())]
        );
    }

    #[test]
    fn get_failure_shows_error_state() {
        let view = UserListView::load(&client(), &Offline);
        assert_eq!(view, UserListView::Failed);
        assert_eq!(view.lines(), vec!["Error!!!".to_string()]);
    }

    #[test]
    fn loading_state_line() {
        assert_eq!(UserListView::Loading.lines(), vec!["Loading...".to_string()]);
    }

    #[test]
    fn reload_issues_a_fresh_request() {
        let transport = Canned::new(200, "[]");
        UserListView::load(&client(), &transport);
        UserListView::load(&client(), &transport);
        assert_eq!(transport.seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn put_targets_demo_user() {
        let transport = Canned::new(200, r#"{"id":11,"username":"tolip","name":"R"}"#);
        let outcome = Demonstrator::Put.run(&client(), &transport).unwrap();
        assert_eq!(outcome, Outcome::Replaced(replacement_user()));
        assert_eq!(
            transport.seen.lock().unwrap()[0],
            (HttpMethod::Put, "http://localhost:8000/users/11".to_string())
        );
    }

    #[test]
    fn delete_reports_status() {
        let transport = Canned::new(200, "{}");
        let outcome = Demonstrator::Delete.run(&client(), &transport).unwrap();
        assert_eq!(outcome, Outcome::Deleted { status: 200 });
    }

    #[test]
    fn post_surfaces_api_errors() {
        let transport = Canned::new(500, "boom");
        let err = Demonstrator::Post.run(&client(), &transport).unwrap_err();
        assert!(matches!(err, DemoError::Api(_)));
    }

    #[test]
    fn run_once_runs_each_demonstrator_once() {
        let results = run_once(&client(), &Echo);
        let demos: Vec<Demonstrator> = results.iter().map(|(d, _)| *d).collect();
        assert_eq!(demos, Demonstrator::ALL.to_vec());

        let outcomes: Vec<Outcome> = results.into_iter().map(|(_, r)| r.unwrap()).collect();
        assert_eq!(
            outcomes,
            vec![
                Outcome::Listed(vec![User::new(1, "Bret", "Leanne Graham")]),
                Outcome::Created(posted_user()),
                Outcome::Replaced(replacement_user()),
                Outcome::Deleted { status: 204 },
            ]
        );
    }

    #[test]
    fn run_once_offline_fails_every_demonstrator() {
        let results = run_once(&client(), &Offline);
        assert_eq!(results.len(), 4);
        assert!(results
            .iter()
            .all(|(_, r)| matches!(r, Err(DemoError::Transport(_)))));
    }
}
