//! Token persistence (JSON file)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::Identity;
use thiserror::Error;

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bearer token plus the last known profile
///
/// The profile is a display hint only; it never authenticates on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub token: String,
    #[serde(default)]
    pub profile: Option<Identity>,
    pub saved_at: DateTime<Utc>,
}

impl PersistedSession {
    pub fn new(token: impl Into<String>, profile: Option<Identity>) -> Self {
        Self {
            token: token.into(),
            profile,
            saved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(SESSION_FILE),
        }
    }

    pub fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Missing or unreadable file reads as "no token"
    pub fn load(&self) -> Option<PersistedSession> {
        if !self.path.exists() {
            return None;
        }
        let parsed = fs::read_to_string(&self.path)
            .map_err(StorageError::from)
            .and_then(|json| serde_json::from_str::<PersistedSession>(&json).map_err(Into::into));
        match parsed {
            Ok(session) if !session.token.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
