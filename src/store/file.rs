//! File-backed session store
//!
//! Persists the token as a small JSON document so that it survives restarts
//! until explicitly cleared. Writes go to a temporary sibling file which is
//! then renamed over the target, so readers never observe a half-written file.

use super::SessionStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::SessionToken;

/// On-disk layout
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Session store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store persisting to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    /// A missing file, or one holding a blank token, reads as no token.
    async fn get_token(&self) -> Result<Option<SessionToken>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read session file '{}'", self.path.display())
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredSession = serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse session file '{}'", self.path.display())
        })?;

        Ok(SessionToken::new(stored.token).ok())
    }

    async fn set_token(&self, token: &SessionToken) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create session directory '{}'", parent.display())
            })?;
        }

        let json = serde_json::to_string(&StoredSession {
            token: token.as_str().to_string(),
        })
        .context("Failed to serialize session")?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .with_context(|| format!("Failed to write session file '{}'", temp.display()))?;
        tokio::fs::rename(&temp, &self.path).await.with_context(|| {
            format!("Failed to replace session file '{}'", self.path.display())
        })?;

        tracing::debug!("Session token saved to {}", self.path.display());
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!("Session token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove session file '{}'", self.path.display())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("nested").join("session.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = store_in(&dir);
        assert!(store.get_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_survives_new_store_instance() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let token = SessionToken::new("abc123").unwrap();
        store_in(&dir).set_token(&token).await.unwrap();

        // A fresh instance stands in for a process restart
        let reopened = store_in(&dir);
        assert_eq!(reopened.get_token().await.unwrap(), Some(token));
        assert!(!reopened.temp_path().exists());
    }

    #[tokio::test]
    async fn test_set_overwrites_and_clear_is_idempotent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = store_in(&dir);

        store.set_token(&SessionToken::new("first").unwrap()).await.unwrap();
        store.set_token(&SessionToken::new("second").unwrap()).await.unwrap();
        assert_eq!(store.get_token().await.unwrap().unwrap().as_str(), "second");

        store.clear_token().await.unwrap();
        assert!(store.get_token().await.unwrap().is_none());
        assert!(!store.path().exists());
        store.clear_token().await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_token_on_disk_reads_as_absent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"token":""}"#).unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get_token().await.unwrap().is_none());

        std::fs::write(&path, "").unwrap();
        assert!(store.get_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileSessionStore::new(&path).get_token().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse session file"));
    }
}
