//! Wire DTOs for the storefront REST auth endpoints.
//!
//! DESIGN
//! ======
//! `User` keeps provider-defined fields in `extra` so a stored profile
//! round-trips without dropping data the backend added later.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Account role attached to every user record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// An authenticated user as returned by the login endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier, if the provider sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Login email address.
    pub email: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Access role; accounts without one are plain users.
    #[serde(default)]
    pub role: Role,
    /// Any other provider-defined profile fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name to show in page chrome, falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(&self.email)
    }
}

/// Email + password credentials posted to the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile posted to the registration endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterProfile {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Successful registration payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    pub token: String,
}

/// Error body shape used by the backend for rejected requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable reason in the body, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
