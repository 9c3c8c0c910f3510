//! Server-side session storage.
//!
//! State is keyed by the opaque visitor id from the signed cookie. The
//! backend is a plain string key-value capability so the game logic stays
//! store-agnostic; the in-memory backend is the only one in tree, since
//! nothing outlives a browsing session.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use color_eyre::{eyre::eyre, Result};

use crate::models::GameSession;

pub trait SessionBackend: Send + Sync {
    fn get(&self, sid: &str) -> Result<Option<String>>;
    fn set(&self, sid: &str, value: String) -> Result<()>;
    fn remove(&self, sid: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionBackend for MemoryStore {
    fn get(&self, sid: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| eyre!("session store lock poisoned"))?;
        Ok(entries.get(sid).cloned())
    }

    fn set(&self, sid: &str, value: String) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| eyre!("session store lock poisoned"))?;
        entries.insert(sid.to_string(), value);
        Ok(())
    }

    fn remove(&self, sid: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| eyre!("session store lock poisoned"))?;
        entries.remove(sid);
        Ok(())
    }
}

/// Typed handle over the backend, cloned into every handler via `AppState`.
#[derive(Clone)]
pub struct Sessions {
    backend: Arc<dyn SessionBackend>,
}

impl Sessions {
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    pub fn load(&self, sid: &str) -> Result<Option<GameSession>> {
        match self.backend.get(sid)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save(&self, sid: &str, session: &GameSession) -> Result<()> {
        self.backend.set(sid, serde_json::to_string(session)?)
    }

    pub fn clear(&self, sid: &str) -> Result<()> {
        self.backend.remove(sid)
    }
}
