use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        email: "aiko@example.com".to_owned(),
        name: "Aiko".to_owned(),
        avatar_icon: None,
        family_id: Some("f1".to_owned()),
        current_member_id: Some("m1".to_owned()),
        created_at: None,
    }
}

fn member(id: &str) -> Member {
    Member {
        id: id.to_owned(),
        name: "Hana".to_owned(),
        avatar_icon: Some("🍙".to_owned()),
        family_id: Some("f1".to_owned()),
        user_id: None,
        is_account_linked: false,
    }
}

fn full_state() -> SessionState {
    SessionState {
        token: Some("t1".to_owned()),
        user: Some(user()),
        members: vec![member("m1"), member("m2")],
        current_member: Some(member("m1")),
        ..SessionState::default()
    }
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    storage.set("k", "v");
    assert_eq!(storage.get("k").as_deref(), Some("v"));
    storage.remove("k");
    assert!(storage.get("k").is_none());
    assert!(storage.is_empty());
}

#[test]
fn browser_storage_is_noop_off_browser() {
    let storage = BrowserStorage;
    storage.set(TOKEN_KEY, "t1");
    assert!(storage.get(TOKEN_KEY).is_none());
    storage.remove(TOKEN_KEY);
}

// =============================================================
// PersistedSession
// =============================================================

#[test]
fn empty_storage_loads_unauthenticated_baseline() {
    let storage = MemoryStorage::new();
    assert_eq!(PersistedSession::new(&storage).load(), SessionState::default());
}

#[test]
fn persist_all_then_load_restores_identity() {
    let storage = MemoryStorage::new();
    let persisted = PersistedSession::new(&storage);
    persisted.persist_all(&full_state());
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t1"));
    assert_eq!(persisted.load(), full_state());
}

#[test]
fn stale_entries_without_token_are_ignored() {
    let storage = MemoryStorage::new();
    let persisted = PersistedSession::new(&storage);
    persisted.persist_user(Some(&user()));
    persisted.persist_current_member(Some(&member("m1")));
    let loaded = persisted.load();
    assert!(!loaded.is_authenticated());
    assert!(loaded.user.is_none());
    assert!(loaded.current_member.is_none());
}

#[test]
fn corrupt_json_entries_load_as_absent() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "t1");
    storage.set(USER_KEY, "{not json");
    storage.set(MEMBERS_KEY, "42");
    let loaded = PersistedSession::new(&storage).load();
    assert_eq!(loaded.token.as_deref(), Some("t1"));
    assert!(loaded.user.is_none());
    assert!(loaded.members.is_empty());
}

#[test]
fn persist_current_member_none_removes_key() {
    let storage = MemoryStorage::new();
    let persisted = PersistedSession::new(&storage);
    persisted.persist_current_member(Some(&member("m1")));
    persisted.persist_current_member(None);
    assert!(storage.get(CURRENT_MEMBER_KEY).is_none());
}

#[test]
fn clear_purges_every_session_key_only() {
    let storage = MemoryStorage::new();
    storage.set("theme", "dark");
    let persisted = PersistedSession::new(&storage);
    persisted.persist_all(&full_state());
    persisted.clear();
    for key in [TOKEN_KEY, USER_KEY, MEMBERS_KEY, CURRENT_MEMBER_KEY] {
        assert!(storage.get(key).is_none(), "{key} should be removed");
    }
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
}
