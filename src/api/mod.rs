//! API layer - articles API client
//!
//! This module contains the client side of the remote articles API:
//! - `ArticleApi` trait, the seam the controller talks to
//! - `HttpArticleApi`, the reqwest implementation
//! - Request/response bodies and the client error type

pub mod client;
pub mod error;
pub mod responses;

#[cfg(test)]
pub(crate) mod mock_server;

use async_trait::async_trait;

use crate::models::{ArticlePayload, SessionToken};

pub use client::HttpArticleApi;
pub use error::ClientError;
pub use responses::{ArticleResponse, ArticlesResponse, LoginResponse, MessageResponse};

/// Articles API
///
/// Authenticated calls take the session token explicitly; callers must not
/// call them without one.
#[async_trait]
pub trait ArticleApi: Send + Sync {
    /// Exchange credentials for a session token
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError>;

    /// Fetch every article
    async fn list_articles(&self, token: &SessionToken) -> Result<ArticlesResponse, ClientError>;

    /// Create an article; the server assigns its identifier
    async fn create_article(
        &self,
        token: &SessionToken,
        payload: &ArticlePayload,
    ) -> Result<ArticleResponse, ClientError>;

    /// Replace the article with the given identifier
    async fn update_article(
        &self,
        token: &SessionToken,
        article_id: i64,
        payload: &ArticlePayload,
    ) -> Result<ArticleResponse, ClientError>;

    /// Delete the article with the given identifier
    async fn delete_article(
        &self,
        token: &SessionToken,
        article_id: i64,
    ) -> Result<MessageResponse, ClientError>;
}
