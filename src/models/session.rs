//! Session model

use serde::{Deserialize, Serialize};

/// Opaque session token proving an authenticated session
///
/// A token is never blank: construction rejects empty and whitespace-only
/// values, so holding a `SessionToken` always means "authenticated".
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

/// Error returned for an unusable token value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Session token must not be empty")]
    Empty,
}

impl SessionToken {
    /// Create a token from the value returned by the login endpoint
    pub fn new(value: impl Into<String>) -> Result<Self, TokenError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionToken> for String {
    fn from(token: SessionToken) -> Self {
        token.0
    }
}

// Keep tokens out of logs
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Authentication phase of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No token stored
    #[default]
    Unauthenticated,
    /// Login request in flight
    Authenticating,
    /// Token stored
    Authenticated,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Unauthenticated => "unauthenticated",
            SessionPhase::Authenticating => "authenticating",
            SessionPhase::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rejects_blank_values() {
        assert_eq!(SessionToken::new(""), Err(TokenError::Empty));
        assert_eq!(SessionToken::new("  \t"), Err(TokenError::Empty));
        assert_eq!(SessionToken::new("abc123").unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_token_serde_enforces_non_empty() {
        let token: SessionToken = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(token.as_str(), "abc123");
        assert!(serde_json::from_str::<SessionToken>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc123\"");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("secret-value").unwrap();
        assert!(!format!("{:?}", token).contains("secret-value"));
    }

    #[test]
    fn test_phase_default_is_unauthenticated() {
        assert_eq!(SessionPhase::default(), SessionPhase::Unauthenticated);
        assert_eq!(SessionPhase::Authenticated.to_string(), "authenticated");
    }
}
