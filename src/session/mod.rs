//! Client-side session lifecycle and route-access policy.
//!
//! ARCHITECTURE
//! ============
//! `store` persists the token + user pair, `manager` owns the in-memory
//! session and its transitions, `guard` decides what a protected route shows,
//! and `flow` strings the auth endpoint and the manager together for screens.
//!
//! State machine per session:
//!
//! ```text
//! Uninitialized -> Loading            (manager constructed)
//! Loading -> Authenticated | Unauthenticated   (initialize)
//! Authenticated -> Loading -> Unauthenticated  (logout)
//! Unauthenticated -> Authenticated    (login)
//! ```

pub mod flow;
pub mod guard;
pub mod manager;
pub mod store;
#[cfg(test)]
pub(crate) mod test_support;

pub use manager::{LogoutOutcome, SessionError, SessionManager, SubscriptionId};
pub use store::{BrowserStore, KeyValueStore, MemoryStore, SessionStore, StoreError, StoredSession};

use crate::net::types::{LoginResponse, User};

/// A bearer token together with the user it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self { token: resp.access_token, user: resp.user }
    }
}

/// Where the session lifecycle currently stands.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    /// Hydration or logout in progress.
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

impl SessionPhase {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Loading)
    }
}
