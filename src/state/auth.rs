//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reactive mirror of the session manager's phase. `App` subscribes an
//! `RwSignal<AuthState>` to the manager; route guards and user-aware
//! components read only this signal.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;
use crate::session::SessionPhase;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State before the stored session has been read.
    #[must_use]
    pub fn hydrating() -> Self {
        Self { user: None, loading: true }
    }
}

impl From<&SessionPhase> for AuthState {
    fn from(phase: &SessionPhase) -> Self {
        Self { user: phase.session().map(|s| s.user.clone()), loading: phase.is_loading() }
    }
}
