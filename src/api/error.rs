//! API client error types

use thiserror::Error;

/// Errors returned by the articles API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the token or credentials (HTTP 401)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any status other than the expected success code
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// Connection failure, timeout, or undecodable response body
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Whether the session should be considered expired
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    /// HTTP status carried by the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}
