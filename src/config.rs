//! Storage key configuration for persisted sessions.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_TOKEN_KEY: &str = "auth_token";
pub const DEFAULT_USER_KEY: &str = "auth_user";

/// Names of the two `localStorage` entries that mirror a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Entry holding the raw bearer token.
    pub token_key: String,
    /// Entry holding the JSON-encoded [`crate::User`].
    pub user_key: String,
}

impl SessionConfig {
    /// Build a config with explicit key names.
    pub fn new(token_key: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self { token_key: token_key.into(), user_key: user_key.into() }
    }

    /// Default key names with `prefix` prepended, for apps sharing an origin.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self::new(format!("{prefix}{DEFAULT_TOKEN_KEY}"), format!("{prefix}{DEFAULT_USER_KEY}"))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_KEY, DEFAULT_USER_KEY)
    }
}
