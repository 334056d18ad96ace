//! `planboard-store` — durable key-value persistence for the session.
//!
//! Two string keys survive a reload: `token` (opaque bearer string) and
//! `user` (JSON-serialized profile). The store has no expiry logic of its
//! own; expiry is provider-driven.
//!
//! Writes are synchronous and last-write-wins. There is **no transaction
//! across keys**: a crash between writing `token` and `user` can leave the
//! pair inconsistent. The observer tolerates this — the provider replay on
//! next start is authoritative and re-syncs both keys.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

use thiserror::Error;

use planboard_auth::{AuthToken, Session, UserRecord};

/// Store keys owned by this crate. Only the observer and the explicit
/// sign-out action may write them.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization failure: {0}")]
    Serde(#[from] serde_json::Error),

    /// A previous writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Synchronous key-value persistence scoped to the process/profile.
///
/// - `set`/`get`/`remove` are last-write-wins on a single key.
/// - `clear` removes everything the store holds.
pub trait SessionStore: Send + Sync {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

/// Persist a session: bearer token plus the serialized profile.
///
/// Sequential writes; see the crate docs for the cross-key failure mode.
pub fn save_session(
    store: &dyn SessionStore,
    session: &Session,
    record: &UserRecord,
) -> Result<(), StoreError> {
    store.set(keys::TOKEN, session.token.as_str())?;
    store.set(keys::USER, &serde_json::to_string(record)?)?;
    Ok(())
}

/// The persisted bearer token, if any.
pub fn cached_token(store: &dyn SessionStore) -> Result<Option<AuthToken>, StoreError> {
    Ok(store.get(keys::TOKEN)?.map(AuthToken::new))
}

/// The persisted user profile, if any.
pub fn cached_user(store: &dyn SessionStore) -> Result<Option<UserRecord>, StoreError> {
    match store.get(keys::USER)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Remove both session keys.
///
/// Sequential removes; no reader depends on the ordering between the two.
pub fn clear_session(store: &dyn SessionStore) -> Result<(), StoreError> {
    store.remove(keys::TOKEN)?;
    store.remove(keys::USER)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard_auth::{AuthProviderKind, EmailAddress};
    use planboard_core::UserId;

    fn sample_session() -> Session {
        Session {
            user_id: UserId::new(),
            email: EmailAddress::parse("eve.holt@reqres.in").unwrap(),
            display_name: Some("Eve Holt".to_string()),
            token: AuthToken::new("tok-abc"),
            provider: AuthProviderKind::Password,
        }
    }

    #[test]
    fn save_then_load_round_trips_both_keys() {
        let store = InMemorySessionStore::new();
        let session = sample_session();
        let record = UserRecord::for_session(&session, None);

        save_session(&store, &session, &record).unwrap();

        assert_eq!(cached_token(&store).unwrap().unwrap().as_str(), "tok-abc");
        assert_eq!(cached_user(&store).unwrap().unwrap(), record);
    }

    #[test]
    fn clear_session_removes_both_keys() {
        let store = InMemorySessionStore::new();
        let session = sample_session();
        let record = UserRecord::for_session(&session, None);
        save_session(&store, &session, &record).unwrap();

        clear_session(&store).unwrap();

        assert!(cached_token(&store).unwrap().is_none());
        assert!(cached_user(&store).unwrap().is_none());
    }

    #[test]
    fn clearing_an_empty_store_is_a_no_op() {
        let store = InMemorySessionStore::new();
        clear_session(&store).unwrap();
        assert!(cached_token(&store).unwrap().is_none());
    }

    #[test]
    fn malformed_user_json_surfaces_as_a_typed_error() {
        let store = InMemorySessionStore::new();
        store.set(keys::USER, "{not json").unwrap();
        assert!(matches!(cached_user(&store), Err(StoreError::Serde(_))));
    }

    #[test]
    fn last_write_wins_per_key() {
        let store = InMemorySessionStore::new();
        store.set(keys::TOKEN, "first").unwrap();
        store.set(keys::TOKEN, "second").unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap().as_deref(), Some("second"));
    }
}
