//! Shared fixtures for session tests: a scripted gateway and record builders.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::storage::MemoryStorage;
use super::store::{SessionEvent, SessionStore};
use crate::config::FallbackMessages;
use crate::net::api::AuthGateway;
use crate::net::error::ApiError;
use crate::net::types::{AuthPayload, Credentials, Member, SignupProfile, User};

type Reply<T> = Mutex<Vec<Result<T, ApiError>>>;

/// Gateway answering from per-endpoint queues; an empty queue is a network
/// failure.
#[derive(Default)]
pub struct FakeGateway {
    pub login: Reply<AuthPayload>,
    pub signup: Reply<AuthPayload>,
    pub logout: Reply<()>,
    pub me: Reply<User>,
    pub select_member: Reply<Member>,
    pub current_member: Reply<Option<Member>>,
    pub list_members: Reply<Vec<Member>>,
    pub calls: Mutex<Vec<String>>,
}

fn next<T>(queue: &Reply<T>) -> Result<T, ApiError> {
    let mut queue = queue.lock().unwrap();
    if queue.is_empty() { Err(ApiError::Network("unscripted call".to_owned())) } else { queue.remove(0) }
}

impl FakeGateway {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Log the call, then yield once so concurrent callers get a chance to run.
    async fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
        tokio::task::yield_now().await;
    }
}

#[async_trait(?Send)]
impl AuthGateway for FakeGateway {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.record(format!("login:{}", credentials.email)).await;
        next(&self.login)
    }

    async fn signup(&self, profile: &SignupProfile) -> Result<AuthPayload, ApiError> {
        self.record(format!("signup:{}", profile.email)).await;
        next(&self.signup)
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.record(format!("logout:{token}")).await;
        next(&self.logout)
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        self.record(format!("me:{token}")).await;
        next(&self.me)
    }

    async fn select_member(&self, token: &str, member_id: &str) -> Result<Member, ApiError> {
        self.record(format!("select_member:{token}:{member_id}")).await;
        next(&self.select_member)
    }

    async fn current_member(&self, token: &str) -> Result<Option<Member>, ApiError> {
        self.record(format!("current_member:{token}")).await;
        next(&self.current_member)
    }

    async fn list_members(&self, token: &str) -> Result<Vec<Member>, ApiError> {
        self.record(format!("list_members:{token}")).await;
        next(&self.list_members)
    }
}

pub fn user() -> User {
    User {
        id: "u1".to_owned(),
        email: "aiko@example.com".to_owned(),
        name: "Aiko".to_owned(),
        avatar_icon: Some("🍳".to_owned()),
        family_id: Some("f1".to_owned()),
        current_member_id: None,
        created_at: None,
    }
}

pub fn member(id: &str) -> Member {
    Member {
        id: id.to_owned(),
        name: format!("member {id}"),
        avatar_icon: None,
        family_id: Some("f1".to_owned()),
        user_id: None,
        is_account_linked: false,
    }
}

pub fn payload(token: &str) -> AuthPayload {
    AuthPayload { token: token.to_owned(), user: user(), members: vec![member("m1"), member("m2")], current_member: None }
}

pub fn unauthorized() -> ApiError {
    ApiError::Status { status: 401, message: Some("Unauthenticated".to_owned()) }
}

pub fn store(gateway: FakeGateway, storage: MemoryStorage) -> SessionStore<FakeGateway, MemoryStorage> {
    SessionStore::new(gateway, storage, FallbackMessages::default())
}

/// Record every event the store emits.
pub fn capture_events<G: AuthGateway>(store: &SessionStore<G, MemoryStorage>) -> Arc<Mutex<Vec<SessionEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    store.subscribe(Arc::new(move |event: &SessionEvent| sink.lock().unwrap().push(event.clone())));
    events
}
