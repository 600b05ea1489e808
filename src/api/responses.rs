//! Request and response bodies of the articles API
//!
//! Every success body carries a human-readable `message` that the client
//! shows on its status line.

use serde::{Deserialize, Serialize};

use crate::models::Article;

// ============================================================================
// Request Types
// ============================================================================

/// POST /login body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Response Types
// ============================================================================

/// POST /login success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: String,
}

/// GET /articles success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
    #[serde(default)]
    pub message: String,
}

/// POST /articles and PUT /articles/{id} success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub article: Article,
    #[serde(default)]
    pub message: String,
}

/// DELETE /articles/{id} success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Body of an error response, when the server sends one
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Pull the message out of a raw error body
    ///
    /// Falls back to the raw text when the body is not the expected JSON.
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { message: Some(message) }) => message,
            _ => body.trim().to_string(),
        }
    }
}
