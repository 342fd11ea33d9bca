//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded route applies the same redirect behavior, driven by the
//! reactive `AuthState` rather than by each page.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::session::guard::{Access, redirect_target};
use crate::state::auth::AuthState;

/// Guard redirects replace the history entry so Back does not bounce.
#[must_use]
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Navigate away whenever auth has loaded and `access` is not satisfied.
pub fn install_guard_redirect<F>(auth: RwSignal<AuthState>, access: Access, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        apply_guard_redirect(access, &auth.get(), &navigate);
    });
}

/// One evaluation of the guard redirect. Returns the path navigated to.
pub fn apply_guard_redirect<F>(access: Access, auth: &AuthState, navigate: &F) -> Option<&'static str>
where
    F: Fn(&str, NavigateOptions),
{
    let path = redirect_target(access, auth)?;
    navigate(path, redirect_options());
    Some(path)
}
