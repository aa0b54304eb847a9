//! Error types for the users client and the demonstrators.
//!
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! resource does not exist" from "the server returned an unexpected status."
//! All other unexpected responses land in `Http` with the raw status code and
//! body.

use thiserror::Error;

/// Errors returned by `UsersClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status the operation does not expect.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// The host could not complete the round-trip (connect, IO, TLS...).
#[derive(Debug, Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

/// Why a demonstrator run produced no outcome.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
