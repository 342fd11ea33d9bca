//! REST client for the storefront auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: stubs returning
//! [`ApiError::Unavailable`], since these endpoints are only meaningful in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>` so screens can show an inline
//! reason and the session manager can log a failed logout without aborting
//! the local sign-out.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Credentials, LoginResponse, RegisterProfile, RegisterResponse};
use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message} ({status})")]
    Rejected { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("request timed out after {0} ms")]
    Timeout(u32),
    #[error("not available on server")]
    Unavailable,
}

/// External authentication endpoint consumed by the session layer.
///
/// Futures are not required to be `Send`; everything runs on the browser's
/// single-threaded executor.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Exchange credentials for a token and user record.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// Create an account.
    async fn register(&self, profile: &RegisterProfile) -> Result<RegisterResponse, ApiError>;

    /// Revoke `token` on the server.
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
}

/// [`AuthApi`] over HTTP using the configured base URL.
#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    base_url: String,
    logout_timeout_ms: u32,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self { base_url: config.api_base_url.clone(), logout_timeout_ms: config.logout_timeout_ms }
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn rejected(status: u16, body: &str) -> ApiError {
    let reason = serde_json::from_str::<super::types::ErrorBody>(body)
        .ok()
        .and_then(|b| b.reason().map(str::to_owned));
    let message = reason.unwrap_or_else(|| match status {
        401 => "invalid email or password".to_owned(),
        403 => "access denied".to_owned(),
        409 => "account already exists".to_owned(),
        _ => format!("request failed: {status}"),
    });
    ApiError::Rejected { status, message }
}

#[cfg(feature = "hydrate")]
async fn read_rejection(resp: gloo_net::http::Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    rejected(status, &body)
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&endpoint(&self.base_url, "auth/login"))
                .json(credentials)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(read_rejection(resp).await);
            }
            resp.json::<LoginResponse>().await.map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (credentials, endpoint(&self.base_url, "auth/login"));
            Err(ApiError::Unavailable)
        }
    }

    async fn register(&self, profile: &RegisterProfile) -> Result<RegisterResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&endpoint(&self.base_url, "auth/register"))
                .json(profile)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                return Err(read_rejection(resp).await);
            }
            resp.json::<RegisterResponse>().await.map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (profile, endpoint(&self.base_url, "auth/register"));
            Err(ApiError::Unavailable)
        }
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let request = std::pin::pin!(async {
                let resp = gloo_net::http::Request::post(&endpoint(&self.base_url, "auth/logout"))
                    .header("Authorization", &bearer(token))
                    .send()
                    .await
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                if !resp.ok() {
                    return Err(read_rejection(resp).await);
                }
                Ok(())
            });
            let timeout = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(self.logout_timeout_ms));
            match select(request, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(ApiError::Timeout(self.logout_timeout_ms)),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (bearer(token), self.logout_timeout_ms);
            Err(ApiError::Unavailable)
        }
    }
}
