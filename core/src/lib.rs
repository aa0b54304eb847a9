//! Core of the to-do exercise: an in-memory list controller and a
//! host-does-IO client for the users REST endpoint.
//!
//! # Overview
//! - [`list`] owns the to-do records, the pending input and the shared
//!   revision draft. Every operation is a synchronous `&mut self` call.
//! - [`client`] builds `HttpRequest` values and parses `HttpResponse` values
//!   for `/users` without touching the network.
//! - [`demo`] drives the four one-shot verb demonstrators through a
//!   caller-supplied [`Transport`].
//!
//! # Design
//! The list controller and the demonstrators share nothing. The network is
//! always on the far side of the `Transport` trait, so everything in this
//! crate is deterministic under test.

pub mod client;
pub mod demo;
pub mod error;
pub mod http;
pub mod list;
pub mod types;

pub use client::UsersClient;
pub use demo::{Demonstrator, Outcome, Transport, UserListView};
pub use error::{ApiError, DemoError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{ListEvent, Record, TodoList};
pub use types::User;
