//! Error types for the acceptance harness.

use std::path::PathBuf;

use petfriends_core::{ApiError, HttpMethod};
use thiserror::Error;

/// The HTTP round-trip itself failed: no status code to report.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{} {url}: {source}", method.as_str())]
    Request {
        method: HttpMethod,
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("reading response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: ureq::Error,
    },
}

/// Errors from `PetFriends` calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("loading .env: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("reading fixture {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a scenario did not pass.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Status code or payload differed from the expected contract.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The account state needed to run the scenario could not be set up.
    #[error("precondition not met: {0}")]
    Precondition(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),
}
