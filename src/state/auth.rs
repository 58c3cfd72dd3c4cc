//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by user-aware components to render identity-dependent UI and to attach
//! the bearer token to outgoing API requests.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

/// The authenticated principal as persisted under the user storage key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub username: String,
    /// Role granted by the backend (e.g. `"MANAGER"`, `"LEADER"`, `"OPERATOR"`).
    pub role: String,
    /// Display name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Department the user belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self { username: username.into(), role: role.into(), name: None, department: None }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Exact role match, the same comparison the backend applies to the role claim.
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has_role(r))
    }

    /// Name to show in the UI: `name` when set and non-blank, else `username`.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

/// Current session: logged-in flag, bearer token and user.
///
/// `is_logged_in` is true exactly when both `token` and `user` are present.
/// Only [`AuthState::logged_in`] and [`AuthState::default`] construct values
/// inside this crate, so the invariant holds for every state a store publishes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_logged_in: bool,
    pub token: Option<String>,
    pub user: Option<User>,
}

impl AuthState {
    /// Fully populated logged-in state.
    pub fn logged_in(token: impl Into<String>, user: User) -> Self {
        Self { is_logged_in: true, token: Some(token.into()), user: Some(user) }
    }

    /// Whether this is the cleared (logged-out) default.
    pub fn is_cleared(&self) -> bool {
        !self.is_logged_in && self.token.is_none() && self.user.is_none()
    }

    /// `Authorization` header value for API calls, when logged in.
    pub fn authorization_header(&self) -> Option<String> {
        if !self.is_logged_in {
            return None;
        }
        self.token.as_deref().map(|token| format!("Bearer {token}"))
    }

    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.role.as_str())
    }
}
