//! Signed-in session state.
//!
//! `Session` is an explicit handle threaded through whatever needs the
//! bearer credential; there is no ambient global. Its lifecycle is `init`
//! on login/registration and `clear` on logout or when the server rejects
//! the token. `SessionFile` persists the credentials between CLI runs.

use anyhow::{Context, Result};
use bugpilot_common::AuthUser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub user: AuthUser,
}

/// Shared, cloneable session handle. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<Credentials>>>,
}

impl Session {
    /// An empty (signed-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_credentials(credentials: Option<Credentials>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(credentials)),
        }
    }

    pub fn init(&self, token: impl Into<String>, user: AuthUser) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Credentials {
            token: token.into(),
            user,
        });
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// Current bearer token, if signed in.
    pub fn bearer(&self) -> Option<String> {
        self.read(|c| c.token.clone())
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.read(|c| c.user.clone())
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.read(|c| c.clone())
    }

    pub fn is_active(&self) -> bool {
        self.read(|_| ()).is_some()
    }

    fn read<T>(&self, f: impl FnOnce(&Credentials) -> T) -> Option<T> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(f)
    }
}

/// On-disk persistence for a session (JSON).
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means signed out. A corrupt file is also treated as
    /// signed out, with a warning.
    pub fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        match serde_json::from_str(&content) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(credentials).context("Failed to serialize session")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;
        Ok(())
    }

    pub fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session file: {}", self.path.display())),
        }
    }

    /// Write the session's current state: save when signed in, remove when not.
    pub fn sync(&self, session: &Session) -> Result<()> {
        match session.credentials() {
            Some(credentials) => self.save(&credentials),
            None => self.remove(),
        }
    }
}
