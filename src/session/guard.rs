//! Route-access decisions for protected views.
//!
//! DESIGN
//! ======
//! The decision is a pure function of `AuthState` so it can be tested without
//! a router. Checks run in a fixed order: loading, then authentication, then
//! role. A visitor who is both signed out and not an admin is therefore sent
//! to the login view, never to the home page.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes;
use crate::state::auth::AuthState;

/// Who may see a protected view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Any signed-in user.
    User,
    /// Signed-in users whose role is `admin`.
    Admin,
}

/// What a guarded route should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session not known yet; show a placeholder and do not navigate.
    Placeholder,
    /// Leave for the given path.
    Redirect(&'static str),
    /// Show the protected content.
    Render,
}

#[must_use]
pub fn evaluate(access: Access, state: &AuthState) -> GuardOutcome {
    if state.loading {
        return GuardOutcome::Placeholder;
    }
    let Some(user) = state.user.as_ref() else {
        return GuardOutcome::Redirect(routes::LOGIN);
    };
    match access {
        Access::Admin if !user.is_admin() => GuardOutcome::Redirect(routes::HOME),
        _ => GuardOutcome::Render,
    }
}

/// Path to navigate to, if any, for the current state.
#[must_use]
pub fn redirect_target(access: Access, state: &AuthState) -> Option<&'static str> {
    match evaluate(access, state) {
        GuardOutcome::Redirect(path) => Some(path),
        GuardOutcome::Placeholder | GuardOutcome::Render => None,
    }
}
