//! Backend login payloads.
//!
//! DESIGN
//! ======
//! These types mirror the JSON returned by the backend's login endpoint so a
//! successful response maps onto [`crate::SessionStore::login`] without any
//! ad-hoc field handling in page code.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::auth::User;

/// Credentials posted to the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// Role claim, e.g. `"MANAGER"`.
    pub role: String,
    /// Department claim; the backend sends `""` for users without one.
    #[serde(default)]
    pub department: Option<String>,
}

impl LoginResponse {
    /// Split into the token and the [`User`] to store for `username`.
    pub fn into_session(self, username: impl Into<String>) -> (String, User) {
        let mut user = User::new(username, self.role);
        user.department = self.department.filter(|d| !d.trim().is_empty());
        (self.token, user)
    }
}

/// Error body returned on failed login (`{"error": "..."}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
