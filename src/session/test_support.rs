//! Scripted auth endpoint and fixtures shared by session tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use futures::channel::oneshot;

use super::store::{MemoryStore, SessionStore};
use super::{Session, SessionManager};
use crate::config::ClientConfig;
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{Credentials, LoginResponse, RegisterProfile, RegisterResponse, Role, User};

pub(crate) fn make_user(email: &str, role: Role) -> User {
    User { id: Some(format!("id-{email}")), email: email.to_owned(), name: None, role, extra: serde_json::Map::new() }
}

pub(crate) fn make_session(token: &str, role: Role) -> Session {
    Session { token: token.to_owned(), user: make_user("ada@example.com", role) }
}

pub(crate) struct FakeAuthApi {
    login_result: Mutex<Result<LoginResponse, ApiError>>,
    register_result: Mutex<Result<RegisterResponse, ApiError>>,
    logout_result: Mutex<Result<(), ApiError>>,
    logout_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub logout_tokens: Mutex<Vec<String>>,
    pub login_calls: AtomicUsize,
}

impl Default for FakeAuthApi {
    fn default() -> Self {
        Self {
            login_result: Mutex::new(Err(ApiError::Unavailable)),
            register_result: Mutex::new(Err(ApiError::Unavailable)),
            logout_result: Mutex::new(Ok(())),
            logout_gate: Mutex::new(None),
            logout_tokens: Mutex::new(Vec::new()),
            login_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeAuthApi {
    pub(crate) fn with_login(self, result: Result<LoginResponse, ApiError>) -> Self {
        *self.login_result.lock().unwrap() = result;
        self
    }

    pub(crate) fn with_register(self, result: Result<RegisterResponse, ApiError>) -> Self {
        *self.register_result.lock().unwrap() = result;
        self
    }

    pub(crate) fn with_logout(self, result: Result<(), ApiError>) -> Self {
        *self.logout_result.lock().unwrap() = result;
        self
    }

    /// Hold every logout until the returned sender fires (or is dropped).
    pub(crate) fn gate_logout(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.logout_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub(crate) fn logout_calls(&self) -> usize {
        self.logout_tokens.lock().unwrap().len()
    }
}

impl AuthApi for FakeAuthApi {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_result.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn register(&self, _profile: &RegisterProfile) -> Result<RegisterResponse, ApiError> {
        self.register_result.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.logout_tokens.lock().unwrap().push(token.to_owned());
        let gate = self.logout_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.logout_result.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

pub(crate) fn make_manager(api: FakeAuthApi) -> (MemoryStore, SessionManager<MemoryStore, FakeAuthApi>) {
    let backend = MemoryStore::new();
    let store = SessionStore::new(backend.clone(), &ClientConfig::default());
    (backend, SessionManager::new(store, api))
}
