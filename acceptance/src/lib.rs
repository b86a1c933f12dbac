//! Acceptance suite for the PetFriends API.
//!
//! # Overview
//! Executes `petfriends-core` requests over blocking HTTP and runs the
//! scenarios in [`scenarios`] against whichever service `Settings` points
//! at: the public PetFriends deployment, or the in-memory mock server in
//! this workspace.
//!
//! # Design
//! - [`transport::Transport`] returns every status as data; only a missing
//!   response is an error.
//! - [`api::PetFriends`] is constructed explicitly and handed to scenarios
//!   through [`scenarios::Context`]; there is no process-wide client.
//! - Scenarios return `Result<(), ScenarioError>` so they can be driven by
//!   `cargo test` or collected by [`scenarios::run_all`].

pub mod api;
pub mod error;
pub mod fixtures;
pub mod scenarios;
pub mod settings;
pub mod transport;

pub use api::PetFriends;
pub use error::{ClientError, FixtureError, ScenarioError, SettingsError, TransportError};
pub use scenarios::{run_all, Context, Outcome, SCENARIOS};
pub use settings::Settings;
pub use transport::Transport;

use tracing_subscriber::EnvFilter;

/// Install a test-friendly fmt subscriber, honoring `RUST_LOG`. Safe to call
/// more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
