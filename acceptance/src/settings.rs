//! Where to find the service and which account to use.
//!
//! Read from the process environment, with a `.env` file in the working
//! directory filling in anything not already set.

use petfriends_core::Credentials;

use crate::error::SettingsError;

pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru";

pub const BASE_URL_VAR: &str = "PETFRIENDS_BASE_URL";
pub const EMAIL_VAR: &str = "PETFRIENDS_EMAIL";
pub const PASSWORD_VAR: &str = "PETFRIENDS_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub credentials: Credentials,
}

impl Settings {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let email = lookup(EMAIL_VAR).ok_or(SettingsError::Missing(EMAIL_VAR))?;
        let password = lookup(PASSWORD_VAR).ok_or(SettingsError::Missing(PASSWORD_VAR))?;
        Ok(Self::new(base_url, Credentials::new(email, password)))
    }
}
