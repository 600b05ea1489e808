//! Session store
//!
//! This module provides storage for the single session token of the client.
//! It supports:
//! - File-backed store - default, survives process restarts
//! - In-memory store - process-local, used in tests and embedded callers
//!
//! # Usage
//!
//! ```rust,ignore
//! use quillpad::config::SessionConfig;
//! use quillpad::store::create_store;
//!
//! let store = create_store(&SessionConfig::default());
//! if let Some(token) = store.get_token().await? {
//!     // authenticated
//! }
//! ```

pub mod file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::SessionConfig;
use crate::models::SessionToken;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Session store trait
///
/// Holds at most one token. Reads have no side effects; `set_token`
/// overwrites any previous value and `clear_token` is idempotent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the current token, if any
    async fn get_token(&self) -> Result<Option<SessionToken>>;

    /// Persist a token, replacing any previous one
    async fn set_token(&self, token: &SessionToken) -> Result<()>;

    /// Remove the stored token
    async fn clear_token(&self) -> Result<()>;
}

/// Create the configured session store
pub fn create_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    Arc::new(FileSessionStore::new(&config.token_path))
}
