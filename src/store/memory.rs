//! In-memory session store

use super::SessionStore;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::SessionToken;

/// Process-local session store
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    token: Arc<RwLock<Option<SessionToken>>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token))),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_token(&self) -> Result<Option<SessionToken>> {
        Ok(self.token.read().await.clone())
    }

    async fn set_token(&self, token: &SessionToken) -> Result<()> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}
