//! Views and the route guard
//!
//! The client has two views:
//! - `/` - login, always reachable
//! - `/articles` - article form and list, protected
//!
//! `RouteGuard` decides whether a protected view may be rendered. It keeps no
//! state of its own: every check reads the session store again.

use std::sync::Arc;

use crate::models::SessionToken;
use crate::store::SessionStore;

/// Client view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Login form, the unauthenticated entry view
    #[default]
    Login,
    /// Article form and list
    Articles,
}

impl View {
    /// Route path of the view
    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "/",
            View::Articles => "/articles",
        }
    }

    /// Resolve a route path; unknown paths land on the login view
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/articles" | "articles" => View::Articles,
            _ => View::Login,
        }
    }

    /// Whether rendering the view requires a session token
    pub fn is_protected(&self) -> bool {
        matches!(self, View::Articles)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Result of guarding a protected view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// Token present; the child was rendered
    Render(T),
    /// Token absent; go here instead
    Redirect(View),
}

/// Gate for protected views
#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<dyn SessionStore>,
}

impl RouteGuard {
    /// Create a guard reading from the given session store
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Current token, treating a store failure as no token
    pub async fn token(&self) -> Option<SessionToken> {
        match self.session.get_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read session token: {:#}", e);
                None
            }
        }
    }

    /// Render `child` when a token is present, else redirect to login
    pub async fn protect<T, F>(&self, child: F) -> Guarded<T>
    where
        F: FnOnce(&SessionToken) -> T,
    {
        match self.token().await {
            Some(token) => Guarded::Render(child(&token)),
            None => {
                tracing::debug!("No session token, redirecting to {}", View::Login);
                Guarded::Redirect(View::Login)
            }
        }
    }

    /// Resolve which view is actually shown when `requested` is asked for
    pub async fn resolve(&self, requested: View) -> View {
        if !requested.is_protected() {
            return requested;
        }
        match self.protect(|_| requested).await {
            Guarded::Render(view) => view,
            Guarded::Redirect(view) => view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use anyhow::Result;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl SessionStore for BrokenStore {
        async fn get_token(&self) -> Result<Option<SessionToken>> {
            anyhow::bail!("disk on fire")
        }
        async fn set_token(&self, _token: &SessionToken) -> Result<()> {
            anyhow::bail!("disk on fire")
        }
        async fn clear_token(&self) -> Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    fn guard_with(token: Option<&str>) -> RouteGuard {
        let store = match token {
            Some(t) => MemorySessionStore::with_token(SessionToken::new(t).unwrap()),
            None => MemorySessionStore::new(),
        };
        RouteGuard::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_renders_children_with_token() {
        let guard = guard_with(Some("abc123"));
        let outcome = guard.protect(|token| format!("articles for {}", token.as_str())).await;
        assert_eq!(outcome, Guarded::Render("articles for abc123".to_string()));
    }

    #[tokio::test]
    async fn test_redirects_without_token() {
        let guard = guard_with(None);
        let mut rendered = false;
        let outcome = guard.protect(|_| rendered = true).await;
        assert_eq!(outcome, Guarded::Redirect(View::Login));
        assert!(!rendered);
    }

    #[tokio::test]
    async fn test_reevaluated_on_every_check() {
        let store = MemorySessionStore::new();
        let guard = RouteGuard::new(Arc::new(store.clone()));
        assert_eq!(guard.resolve(View::Articles).await, View::Login);

        store.set_token(&SessionToken::new("abc123").unwrap()).await.unwrap();
        assert_eq!(guard.resolve(View::Articles).await, View::Articles);

        store.clear_token().await.unwrap();
        assert_eq!(guard.resolve(View::Articles).await, View::Login);
    }

    #[tokio::test]
    async fn test_store_failure_redirects() {
        let guard = RouteGuard::new(Arc::new(BrokenStore));
        assert_eq!(guard.protect(|_| ()).await, Guarded::Redirect(View::Login));
    }

    #[tokio::test]
    async fn test_login_view_is_never_guarded() {
        let guard = guard_with(None);
        assert_eq!(guard.resolve(View::Login).await, View::Login);
    }

    #[test]
    fn test_view_paths() {
        assert_eq!(View::from_path("/"), View::Login);
        assert_eq!(View::from_path("/articles"), View::Articles);
        assert_eq!(View::from_path("/articles/"), View::Articles);
        assert_eq!(View::from_path("/nowhere"), View::Login);
        assert!(View::Articles.is_protected());
        assert_eq!(View::Articles.to_string(), "/articles");
    }
}
