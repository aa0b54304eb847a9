//! Runs the four users demonstrators once and exits.
//!
//! The demonstrators run concurrently. PUT and DELETE on user 11 may reach
//! the server before the POST that creates it and then fail with 404, so
//! the exit code can differ between runs against the same server. A
//! non-zero exit only means at least one demonstrator got an error.

use std::process::ExitCode;

use demos::{Config, UreqTransport};
use todo_core::{demo, Demonstrator, Outcome, UserListView, UsersClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    tracing::info!(base_url = %config.base_url, "running demonstrators");

    let client = UsersClient::new(&config.base_url);
    let transport = UreqTransport::new();

    println!("{}", UserListView::Loading.lines().join("\n"));
    let mut failures = 0;
    for (which, result) in demo::run_once(&client, &transport) {
        match result {
            Ok(Outcome::Listed(users)) => {
                for line in UserListView::Loaded(users).lines() {
                    println!("{line}");
                }
            }
            Ok(_) => {}
            Err(_) if which == Demonstrator::Get => {
                println!("{}", UserListView::Failed.lines().join("\n"));
                failures += 1;
            }
            Err(_) => failures += 1,
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        tracing::warn!(failures, "some demonstrators failed");
        ExitCode::FAILURE
    }
}
