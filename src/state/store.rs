//! Session store: the single owner of login, roster and member selection.
//!
//! ARCHITECTURE
//! ============
//! The store wraps an [`AuthGateway`] and a [`KeyValueStorage`]. Every
//! mutation goes through `commit`, which updates the in-memory state and its
//! persisted copy under one lock, then notifies subscribers. Navigation and
//! the reactive UI mirror are subscribers; the store never navigates.
//!
//! CONCURRENCY
//! ===========
//! Mutating operations queue on an async operation lock, so a second login
//! started while the first is pending waits for it instead of interleaving.
//! The state lock is never held across an `.await`.
//!
//! ERROR HANDLING
//! ==============
//! `login`, `signup` and `select_member` return `Err(AuthFailure)` and leave
//! identity untouched. Maintenance calls return a [`SessionOutcome`]: a
//! failed `fetch_user`, or a 401 on any token-bearing call, clears the whole
//! session and emits [`SessionEvent::Invalidated`]; other failures are logged
//! and absorbed.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::session::SessionState;
use super::storage::{KeyValueStorage, PersistedSession};
use crate::config::FallbackMessages;
use crate::net::api::AuthGateway;
use crate::net::error::{ApiError, AuthFailure, SessionOutcome};
use crate::net::types::{AuthPayload, Credentials, SignupProfile};

/// Notification emitted after the store changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// State changed; carries the new snapshot.
    Changed(SessionState),
    /// Login or signup succeeded.
    Authenticated,
    /// `logout` finished clearing the session.
    LoggedOut,
    /// The token was rejected and the session was cleared.
    Invalidated,
}

pub type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

pub struct SessionStore<G, S> {
    gateway: G,
    storage: S,
    messages: FallbackMessages,
    state: Mutex<SessionState>,
    op_lock: futures::lock::Mutex<()>,
    listeners: Mutex<Vec<Listener>>,
}

impl<G: AuthGateway, S: KeyValueStorage> SessionStore<G, S> {
    /// Build a store hydrated from whatever `storage` holds.
    pub fn new(gateway: G, storage: S, messages: FallbackMessages) -> Self {
        let state = PersistedSession::new(&storage).load();
        Self {
            gateway,
            storage,
            messages,
            state: Mutex::new(state),
            op_lock: futures::lock::Mutex::new(()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock_state().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_state().is_authenticated()
    }

    pub fn has_selected_member(&self) -> bool {
        self.lock_state().has_selected_member()
    }

    pub fn has_members(&self) -> bool {
        self.lock_state().has_members()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a listener for every subsequent [`SessionEvent`].
    pub fn subscribe(&self, listener: Listener) {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push(listener);
    }

    // =========================================================================
    // User-input-driven operations
    // =========================================================================

    /// Log in with email and password.
    ///
    /// On success token, user, roster and current member are replaced and
    /// persisted together, then [`SessionEvent::Authenticated`] is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure`] when either field is blank or the gateway
    /// rejects the request; identity state is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthFailure> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            let failure = AuthFailure::InvalidInput(self.messages.missing_credentials.to_owned());
            self.record_failure(&failure);
            return Err(failure);
        }
        let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };

        let _op = self.op_lock.lock().await;
        self.begin_request();
        let result = self.gateway.login(&credentials).await;
        self.finish_auth(result, self.messages.login)
    }

    /// Register an account and log in as it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure`] when required fields are blank or the gateway
    /// rejects the registration; identity state is left untouched.
    pub async fn signup(&self, profile: &SignupProfile) -> Result<(), AuthFailure> {
        if profile.email.trim().is_empty() || profile.password.is_empty() {
            let failure = AuthFailure::InvalidInput(self.messages.missing_credentials.to_owned());
            self.record_failure(&failure);
            return Err(failure);
        }

        let _op = self.op_lock.lock().await;
        self.begin_request();
        let result = self.gateway.signup(profile).await;
        self.finish_auth(result, self.messages.signup)
    }

    /// Make `member_id` the acting member.
    ///
    /// The user's `current_member_id` follows the selection; both are
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure`] when the id is blank, no session is held, or
    /// the gateway rejects the selection. A 401 additionally clears the
    /// session.
    pub async fn select_member(&self, member_id: &str) -> Result<(), AuthFailure> {
        let member_id = member_id.trim();
        if member_id.is_empty() {
            let failure = AuthFailure::InvalidInput(self.messages.missing_member.to_owned());
            self.record_failure(&failure);
            return Err(failure);
        }

        let _op = self.op_lock.lock().await;
        let Some(token) = self.token() else {
            let failure = AuthFailure::InvalidInput(self.messages.not_authenticated.to_owned());
            self.record_failure(&failure);
            return Err(failure);
        };
        match self.gateway.select_member(&token, member_id).await {
            Ok(member) => {
                self.commit(|state, persisted| {
                    if let Some(user) = state.user.as_mut() {
                        user.current_member_id = Some(member.id.clone());
                        persisted.persist_user(Some(&*user));
                    }
                    persisted.persist_current_member(Some(&member));
                    state.current_member = Some(member);
                    state.error = None;
                });
                Ok(())
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.invalidate("select_member", &err);
                }
                let failure = AuthFailure::rejected(err, self.messages.select_member);
                self.record_failure(&failure);
                Err(failure)
            }
        }
    }

    // =========================================================================
    // Session maintenance
    // =========================================================================

    /// End the session. Never fails from the caller's perspective.
    ///
    /// The server call is best-effort; local state and storage are cleared
    /// whatever it returns.
    pub async fn logout(&self) -> SessionOutcome {
        let _op = self.op_lock.lock().await;
        let outcome = match self.token() {
            None => SessionOutcome::Skipped,
            Some(token) => match self.gateway.logout(&token).await {
                Ok(()) => SessionOutcome::Applied,
                Err(err) => {
                    leptos::logging::warn!("logout request failed, clearing anyway: {err}");
                    SessionOutcome::Absorbed(err)
                }
            },
        };
        self.clear_session();
        self.emit(&SessionEvent::LoggedOut);
        outcome
    }

    /// Re-read the user behind the held token.
    ///
    /// Any failure means the token is no longer valid: the whole session is
    /// cleared.
    pub async fn fetch_user(&self) -> SessionOutcome {
        let _op = self.op_lock.lock().await;
        let Some(token) = self.token() else {
            return SessionOutcome::Skipped;
        };
        match self.gateway.me(&token).await {
            Ok(user) => {
                self.commit(|state, persisted| {
                    persisted.persist_user(Some(&user));
                    state.user = Some(user);
                });
                SessionOutcome::Applied
            }
            Err(err) => {
                self.invalidate("fetch_user", &err);
                SessionOutcome::Invalidated(err)
            }
        }
    }

    /// Sync the acting member with the server.
    ///
    /// "No member selected" is a normal answer and only clears the current
    /// member.
    pub async fn fetch_current_member(&self) -> SessionOutcome {
        let _op = self.op_lock.lock().await;
        let Some(token) = self.token() else {
            return SessionOutcome::Skipped;
        };
        match self.gateway.current_member(&token).await {
            Ok(member) => {
                self.commit(|state, persisted| {
                    persisted.persist_current_member(member.as_ref());
                    state.current_member = member;
                });
                SessionOutcome::Applied
            }
            Err(err) => self.absorb("fetch_current_member", err),
        }
    }

    /// Reload the family roster. On failure the previous roster stays.
    pub async fn refresh_members(&self) -> SessionOutcome {
        let _op = self.op_lock.lock().await;
        let Some(token) = self.token() else {
            return SessionOutcome::Skipped;
        };
        match self.gateway.list_members(&token).await {
            Ok(members) => {
                self.commit(|state, persisted| {
                    persisted.persist_members(&members);
                    state.members = members;
                    if state.current_member.is_some() && !state.current_member_in_roster() {
                        leptos::logging::warn!("refresh_members: acting member is not in the refreshed roster");
                    }
                });
                SessionOutcome::Applied
            }
            Err(err) => self.absorb("refresh_members", err),
        }
    }

    /// Boot-time validation of a persisted session.
    ///
    /// Runs `fetch_user`, then `fetch_current_member`, then `refresh_members`,
    /// strictly in sequence and only while the session stays valid. Returns
    /// the identity outcome; completion in any form means the app can render.
    pub async fn init_auth(&self) -> SessionOutcome {
        if !self.is_authenticated() {
            return SessionOutcome::Skipped;
        }
        let outcome = self.fetch_user().await;
        if !outcome.is_applied() {
            return outcome;
        }
        if let invalidated @ SessionOutcome::Invalidated(_) = self.fetch_current_member().await {
            return invalidated;
        }
        if let invalidated @ SessionOutcome::Invalidated(_) = self.refresh_members().await {
            return invalidated;
        }
        outcome
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn token(&self) -> Option<String> {
        self.lock_state().token.clone()
    }

    /// Apply a mutation and its paired storage writes, then notify.
    fn commit<F>(&self, mutate: F)
    where
        F: FnOnce(&mut SessionState, &PersistedSession<'_, S>),
    {
        let snapshot = {
            let mut state = self.lock_state();
            mutate(&mut state, &PersistedSession::new(&self.storage));
            state.clone()
        };
        self.emit(&SessionEvent::Changed(snapshot));
    }

    /// Drop every identity field in memory and in storage.
    fn clear_session(&self) {
        self.commit(|state, persisted| {
            persisted.clear();
            state.token = None;
            state.user = None;
            state.members.clear();
            state.current_member = None;
            state.loading = false;
        });
    }

    fn invalidate(&self, op: &str, err: &ApiError) {
        leptos::logging::warn!("{op}: session rejected, clearing: {err}");
        self.clear_session();
        self.emit(&SessionEvent::Invalidated);
    }

    fn absorb(&self, op: &str, err: ApiError) -> SessionOutcome {
        if err.is_unauthorized() {
            self.invalidate(op, &err);
            return SessionOutcome::Invalidated(err);
        }
        leptos::logging::warn!("{op} failed, keeping current state: {err}");
        SessionOutcome::Absorbed(err)
    }

    fn begin_request(&self) {
        self.commit(|state, _| {
            state.loading = true;
            state.error = None;
        });
    }

    fn record_failure(&self, failure: &AuthFailure) {
        leptos::logging::warn!("auth request failed: {failure}");
        let message = failure.message().to_owned();
        self.commit(|state, _| {
            state.loading = false;
            state.error = Some(message);
        });
    }

    fn finish_auth(&self, result: Result<AuthPayload, ApiError>, fallback: &str) -> Result<(), AuthFailure> {
        match result {
            Ok(payload) => {
                self.commit(|state, persisted| {
                    state.token = Some(payload.token);
                    state.user = Some(payload.user);
                    state.members = payload.members;
                    state.current_member = payload.current_member;
                    state.loading = false;
                    state.error = None;
                    persisted.persist_all(state);
                });
                self.emit(&SessionEvent::Authenticated);
                Ok(())
            }
            Err(err) => {
                let failure = AuthFailure::rejected(err, fallback);
                self.record_failure(&failure);
                Err(failure)
            }
        }
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner).clone();
        for listener in listeners {
            listener(event);
        }
    }
}
