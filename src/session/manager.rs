//! Session manager: the single owner of the in-memory session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Constructed once by `App` and shared through Leptos context. Screens call
//! `login` after the auth endpoint succeeded; the toolbar calls `logout`.
//! Subscribers (the reactive `AuthState` signal) are told about every phase
//! change so route guards re-evaluate.
//!
//! TRADE-OFFS
//! ==========
//! Logout is client-authoritative: the local session is cleared after the
//! remote attempt no matter how that attempt ends, including the logout
//! future being dropped mid-flight. A second logout while one is outstanding
//! is rejected with `SessionError::Busy`, as is a login racing it.
//!
//! `logout_then` runs the caller's hook after the remote attempt settles but
//! before `Unauthenticated` is published, so a sign-out can leave a guarded
//! page before its guard sees the signed-out state.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::store::{KeyValueStore, SessionStore, StoredSession};
use super::{Session, SessionPhase};
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("another session operation is in progress")]
    Busy,
}

/// How the remote half of a logout went. The local half always succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    Clean,
    RemoteFailed(ApiError),
}

/// Handle returned by [`SessionManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(&SessionPhase) + Send + Sync>;

struct ManagerState {
    phase: SessionPhase,
    hydrated: bool,
    logout_in_flight: bool,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

struct Shared<K, A> {
    store: SessionStore<K>,
    api: A,
    state: Mutex<ManagerState>,
}

/// Owns the session state machine and its persistence.
pub struct SessionManager<K, A> {
    shared: Arc<Shared<K, A>>,
}

impl<K, A> Clone for SessionManager<K, A> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<K: KeyValueStore, A: AuthApi> SessionManager<K, A> {
    /// Create a manager in the `Loading` phase. Call [`Self::initialize`]
    /// before any route guard evaluates.
    #[must_use]
    pub fn new(store: SessionStore<K>, api: A) -> Self {
        let state = ManagerState {
            phase: SessionPhase::Loading,
            hydrated: false,
            logout_in_flight: false,
            next_subscription: 0,
            subscribers: Vec::new(),
        };
        Self { shared: Arc::new(Shared { store, api, state: Mutex::new(state) }) }
    }

    /// The auth endpoint this manager logs out against.
    pub fn api(&self) -> &A {
        &self.shared.api
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.lock_state().phase.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock_state().phase.session().map(|s| s.user.clone())
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock_state().phase.session().map(|s| s.token.clone())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock_state().phase.is_loading()
    }

    /// Whether a storage change on `key` (`None` for a full clear) can affect
    /// the session.
    #[must_use]
    pub fn watches_key(&self, key: Option<&str>) -> bool {
        self.shared.store.is_session_key(key)
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Hydrate from the store. Only the first call reads storage; later calls
    /// return the current phase unchanged.
    pub fn initialize(&self) -> SessionPhase {
        let phase = {
            let mut state = self.lock_state();
            if state.hydrated {
                leptos::logging::log!("session already initialized");
                return state.phase.clone();
            }
            state.hydrated = true;
            state.phase = match self.shared.store.load() {
                StoredSession::Present(session) => SessionPhase::Authenticated(session),
                StoredSession::Absent => SessionPhase::Unauthenticated,
                StoredSession::Malformed => {
                    leptos::logging::warn!("discarding malformed stored session");
                    if let Err(e) = self.shared.store.clear() {
                        leptos::logging::warn!("could not purge stored session: {e}");
                    }
                    SessionPhase::Unauthenticated
                }
            };
            state.phase.clone()
        };
        self.notify(&phase);
        phase
    }

    /// Record a session obtained from the auth endpoint.
    ///
    /// A failed storage write is logged; the in-memory session is set anyway.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] while a logout is in flight.
    pub fn login(&self, session: Session) -> Result<(), SessionError> {
        let phase = {
            let mut state = self.lock_state();
            if state.logout_in_flight {
                return Err(SessionError::Busy);
            }
            if let Err(e) = self.shared.store.save(&session) {
                leptos::logging::warn!("could not persist session: {e}");
            }
            state.hydrated = true;
            state.phase = SessionPhase::Authenticated(session);
            state.phase.clone()
        };
        self.notify(&phase);
        Ok(())
    }

    /// Sign out: revoke remotely when there is a token, then clear locally.
    ///
    /// Before `initialize` has run the token is taken from storage, so a
    /// persisted session is still revoked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] if another logout is still in flight.
    /// Remote failures are reported through [`LogoutOutcome::RemoteFailed`].
    pub async fn logout(&self) -> Result<LogoutOutcome, SessionError> {
        self.logout_then(|_| {}).await
    }

    /// [`Self::logout`], calling `before_clear` once the remote attempt has
    /// settled and before subscribers see `Unauthenticated`.
    ///
    /// `before_clear` is skipped if the future is dropped mid-flight; the
    /// local clear still happens.
    ///
    /// # Errors
    ///
    /// Same as [`Self::logout`].
    pub async fn logout_then<F>(&self, before_clear: F) -> Result<LogoutOutcome, SessionError>
    where
        F: FnOnce(&LogoutOutcome),
    {
        let token = {
            let mut state = self.lock_state();
            if state.logout_in_flight {
                return Err(SessionError::Busy);
            }
            state.logout_in_flight = true;
            let token = if state.hydrated {
                state.phase.session().map(|s| s.token.clone())
            } else {
                match self.shared.store.load() {
                    StoredSession::Present(session) => Some(session.token),
                    StoredSession::Absent | StoredSession::Malformed => None,
                }
            };
            state.phase = SessionPhase::Loading;
            token
        };
        self.notify(&SessionPhase::Loading);

        let local_clear = ClearOnExit { manager: self };
        let remote = match token {
            Some(token) => self.shared.api.logout(&token).await,
            None => Ok(()),
        };
        let outcome = match remote {
            Ok(()) => LogoutOutcome::Clean,
            Err(e) => {
                leptos::logging::warn!("remote logout failed: {e}");
                LogoutOutcome::RemoteFailed(e)
            }
        };
        before_clear(&outcome);
        drop(local_clear);
        Ok(outcome)
    }

    /// Re-read the store after another tab changed it.
    ///
    /// Returns whether the phase changed. Ignored before hydration, while a
    /// logout is in flight, and while the stored pair is half-written.
    pub fn resync(&self) -> bool {
        let phase = {
            let mut state = self.lock_state();
            if !state.hydrated || state.logout_in_flight {
                return false;
            }
            let next = match self.shared.store.load() {
                StoredSession::Present(session) => SessionPhase::Authenticated(session),
                StoredSession::Absent => SessionPhase::Unauthenticated,
                StoredSession::Malformed => return false,
            };
            if next == state.phase {
                return false;
            }
            state.phase = next;
            state.phase.clone()
        };
        self.notify(&phase);
        true
    }

    fn finish_logout(&self) {
        if let Err(e) = self.shared.store.clear() {
            leptos::logging::warn!("could not clear stored session: {e}");
        }
        {
            let mut state = self.lock_state();
            state.hydrated = true;
            state.logout_in_flight = false;
            state.phase = SessionPhase::Unauthenticated;
        }
        self.notify(&SessionPhase::Unauthenticated);
    }
}

impl<K, A> SessionManager<K, A> {
    // =========================================================================
    // SUBSCRIBERS
    // =========================================================================

    /// Call `f` with the new phase after every transition.
    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&SessionPhase) + Send + Sync + 'static,
    {
        let mut state = self.lock_state();
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.subscribers.push((id, Arc::new(f)));
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock_state();
        let before = state.subscribers.len();
        state.subscribers.retain(|(sub, _)| *sub != id);
        state.subscribers.len() != before
    }

    fn notify(&self, phase: &SessionPhase) {
        // Snapshot first so subscribers may read the manager without deadlocking.
        let subscribers: Vec<Subscriber> = self
            .lock_state()
            .subscribers
            .iter()
            .map(|(_, f)| Arc::clone(f))
            .collect();
        for subscriber in subscribers {
            subscriber(phase);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ManagerState> {
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the local session when the logout path exits, however it exits.
struct ClearOnExit<'a, K: KeyValueStore, A: AuthApi> {
    manager: &'a SessionManager<K, A>,
}

impl<K: KeyValueStore, A: AuthApi> Drop for ClearOnExit<'_, K, A> {
    fn drop(&mut self) {
        self.manager.finish_logout();
    }
}
