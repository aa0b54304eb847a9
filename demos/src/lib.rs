//! Host side of the users demonstrators: configuration and a blocking
//! `ureq` transport for `todo_core`'s build/parse client.

pub mod config;
pub mod transport;

pub use config::Config;
pub use transport::UreqTransport;
