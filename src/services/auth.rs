//! Admin session management
//!
//! The bearer token returned by `POST /auth/login` is the only authentication
//! signal the portal has. This module gives it an explicit lifecycle:
//! a session is created on login, checked before protected calls, and
//! invalidated on logout or when the backend answers 401.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::utils::errors::Result;

/// An authenticated admin session
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "admin_token")]
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            created_at: Utc::now(),
        }
    }

    /// A session is usable while it carries a token; expiry is decided by the backend
    pub fn is_valid(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Where the session survives between runs
pub trait SessionStore: Send + Sync + fmt::Debug {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON file holding the session under the `admin_token` key
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Session>(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let serialized = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, serialized)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Owner of the current session, shared with the API client
#[derive(Debug)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    /// Create a manager, restoring any session the store already holds
    pub fn new(store: Arc<dyn SessionStore>) -> Result<Self> {
        let restored = store.load()?.filter(Session::is_valid);
        if restored.is_some() {
            debug!("Restored admin session from store");
        }

        Ok(Self {
            store,
            current: RwLock::new(restored),
        })
    }

    /// Manager backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemorySessionStore::new()),
            current: RwLock::new(None),
        }
    }

    /// Begin a session with a token issued by the backend
    pub fn start(&self, token: impl Into<String>) -> Result<Session> {
        let session = Session::new(token);
        self.store.save(&session)?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        info!("Admin session started");
        Ok(session)
    }

    /// Drop the session locally and in the store
    pub fn invalidate(&self) -> Result<()> {
        let had_session = self
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some();
        self.store.clear()?;

        if had_session {
            info!("Admin session invalidated");
        }
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Bearer token for protected calls
    pub fn token(&self) -> Option<String> {
        self.current().filter(Session::is_valid).map(|s| s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_lifecycle() {
        let manager = SessionManager::in_memory();
        assert!(!manager.is_authenticated());

        manager.start("abc123").unwrap();
        assert!(manager.is_authenticated());
        assert_eq!(manager.token().as_deref(), Some("abc123"));

        manager.invalidate().unwrap();
        assert!(!manager.is_authenticated());
        assert!(manager.token().is_none());
    }

    #[test]
    fn test_blank_token_is_not_authenticated() {
        let manager = SessionManager::in_memory();
        manager.start("  ").unwrap();
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_file_store_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let manager = SessionManager::new(Arc::new(FileSessionStore::new(&path))).unwrap();
        manager.start("persisted-token").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"admin_token\""));

        let restored = SessionManager::new(Arc::new(FileSessionStore::new(&path))).unwrap();
        assert_eq!(restored.token().as_deref(), Some("persisted-token"));

        restored.invalidate().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_session_file_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let manager = SessionManager::new(Arc::new(FileSessionStore::new(&path))).unwrap();
        assert!(!manager.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("secret");
        assert!(!format!("{:?}", session).contains("secret"));
    }
}
