//! # Session Persistence
//!
//! The logged-in identity is mirrored into durable storage under
//! [`SESSION_KEY`] as `{"username": "..."}` so a restart lands straight in
//! the chat view. A missing, unreadable or unparseable record means
//! "logged out"; it is never an error for the caller.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::action::Effect;
use crate::core::storage::{KeyValueStore, StorageError};

pub const SESSION_KEY: &str = "user";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Reads the persisted session, if any.
pub fn restore(store: &dyn KeyValueStore) -> Option<Session> {
    let raw = match store.get(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No persisted session");
            return None;
        }
        Err(e) => {
            warn!("Failed to read persisted session: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<Session>(&raw) {
        Ok(session) => {
            info!("Restored session for user={}", session.username);
            Some(session)
        }
        Err(e) => {
            warn!("Ignoring malformed session record: {}", e);
            None
        }
    }
}

pub fn persist(store: &dyn KeyValueStore, session: &Session) -> Result<(), StorageError> {
    let json = serde_json::to_string(session)?;
    store.set(SESSION_KEY, &json)?;
    debug!("Session persisted for user={}", session.username);
    Ok(())
}

pub fn erase(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.remove(SESSION_KEY)?;
    debug!("Session record erased");
    Ok(())
}

/// Executes the storage half of an [`Effect`]. Network effects are left to
/// the caller; for them this is a no-op.
pub fn apply_effect(store: &dyn KeyValueStore, effect: &Effect) -> Result<(), StorageError> {
    match effect {
        Effect::PersistSession(session) => persist(store, session),
        Effect::EraseSession => erase(store),
        _ => Ok(()),
    }
}
