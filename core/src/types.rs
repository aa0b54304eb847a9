//! Users resource as served under `/users`.
//!
//! Defined independently from the mock-server crate; the integration tests
//! catch schema drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
}

impl User {
    pub fn new(id: u64, username: &str, name: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            name: name.to_string(),
        }
    }
}

/// List-item form: `username (name)`.
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.name)
    }
}
