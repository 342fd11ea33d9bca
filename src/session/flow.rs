//! Auth screen orchestration: endpoint call first, session change second.
//!
//! ERROR HANDLING
//! ==============
//! A rejected login never reaches the session manager; the screen gets a
//! `SignInError` to show inline. Sign-out always lands on the home page and
//! hands back a notice when only the remote half failed.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use super::manager::{LogoutOutcome, SessionError, SessionManager};
use super::store::KeyValueStore;
use super::Session;
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{Credentials, RegisterProfile, User};
use crate::routes;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("this account does not have admin access")]
    NotAdmin,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Log in with email + password and start a session.
///
/// # Errors
///
/// Returns [`SignInError::Api`] when the endpoint rejects the credentials or
/// cannot be reached, and [`SignInError::Session`] while a logout is pending.
pub async fn sign_in<K, A>(manager: &SessionManager<K, A>, credentials: &Credentials) -> Result<User, SignInError>
where
    K: KeyValueStore,
    A: AuthApi,
{
    let session = Session::from(manager.api().login(credentials).await?);
    let user = session.user.clone();
    manager.login(session)?;
    leptos::logging::log!("signed in as {}", user.email);
    Ok(user)
}

/// Like [`sign_in`], but only admin accounts get a session.
///
/// A token issued to a non-admin account is revoked best-effort.
///
/// # Errors
///
/// Same as [`sign_in`], plus [`SignInError::NotAdmin`].
pub async fn admin_sign_in<K, A>(
    manager: &SessionManager<K, A>,
    credentials: &Credentials,
) -> Result<User, SignInError>
where
    K: KeyValueStore,
    A: AuthApi,
{
    let session = Session::from(manager.api().login(credentials).await?);
    if !session.user.is_admin() {
        leptos::logging::warn!("admin login refused for {}", session.user.email);
        if let Err(e) = manager.api().logout(&session.token).await {
            leptos::logging::warn!("could not revoke non-admin token: {e}");
        }
        return Err(SignInError::NotAdmin);
    }
    let user = session.user.clone();
    manager.login(session)?;
    leptos::logging::log!("admin signed in as {}", user.email);
    Ok(user)
}

/// Create an account. The caller sends the user to the login view next; the
/// endpoint returns no user record, so no session starts here.
///
/// # Errors
///
/// Returns the endpoint's [`ApiError`].
pub async fn sign_up<A: AuthApi>(api: &A, profile: &RegisterProfile) -> Result<(), ApiError> {
    api.register(profile).await?;
    leptos::logging::log!("registered {}", profile.email);
    Ok(())
}

/// Log out and navigate to the home page.
///
/// The navigation happens before the signed-out state is published, so a
/// route guard on the page being left never redirects to the login view.
/// Returns a notice for the user when the server-side logout failed. A call
/// made while another sign-out is pending does nothing.
pub async fn sign_out<K, A, F>(manager: &SessionManager<K, A>, navigate: F) -> Option<String>
where
    K: KeyValueStore,
    A: AuthApi,
    F: Fn(&str),
{
    match manager.logout_then(|_| navigate(routes::HOME)).await {
        Ok(LogoutOutcome::Clean) | Err(SessionError::Busy) => None,
        Ok(LogoutOutcome::RemoteFailed(e)) => Some(logout_notice(&e)),
    }
}

fn logout_notice(err: &ApiError) -> String {
    format!("Signed out on this device, but the server logout failed: {err}")
}
