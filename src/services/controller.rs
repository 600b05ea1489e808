//! Article controller
//!
//! Implements the client's request/response handling:
//! - Login/logout and the session phase state machine
//! - Listing, creating, updating and deleting articles
//! - Edit selection for the article form
//! - Navigation between the login and article views through the route guard
//!
//! Every operation overwrites the status message with its outcome and holds
//! the busy indicator while it runs. Failures never escape: they are logged
//! and turned into a status message, and the caller gets an `Outcome`.

use std::sync::Arc;

use crate::api::{ArticleApi, ClientError};
use crate::models::{
    Article, ArticleCollection, ArticleDraft, ArticleForm, ArticlePayload, ArticleRequest,
    SessionPhase, SessionToken,
};
use crate::routes::{RouteGuard, View};
use crate::services::busy::BusyIndicator;
use crate::store::SessionStore;

pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_GOODBYE: &str = "Goodbye!";
pub const MSG_INVALID_ARTICLE: &str = "Invalid article data";
pub const MSG_LIST_FAILED: &str = "Failed to load articles";
pub const MSG_CREATE_FAILED: &str = "Failed to create the article";
pub const MSG_UPDATE_FAILED: &str = "Failed to update the article";
pub const MSG_DELETE_FAILED: &str = "Failed to delete the article";
pub const MSG_SESSION_EXPIRED: &str = "Session expired, please log in again";

/// What an operation ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded and state was updated
    Completed,
    /// No usable session; navigated to the given view instead
    Redirected(View),
    /// Draft failed validation; nothing was sent
    Invalid,
    /// Update target is not the article selected for editing; nothing was sent
    StaleSelection,
    /// The request failed; the status message says so
    Failed,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// In-memory client state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Status line
    pub message: String,
    /// Articles fetched from the server
    pub articles: ArticleCollection,
    /// Article selected for editing
    pub current_article_id: Option<i64>,
    /// Authentication phase
    pub phase: SessionPhase,
    /// View currently shown
    pub view: View,
}

/// Article controller
pub struct ArticleController {
    api: Arc<dyn ArticleApi>,
    session: Arc<dyn SessionStore>,
    guard: RouteGuard,
    busy: BusyIndicator,
    state: UiState,
}

impl ArticleController {
    /// Create a controller in the unauthenticated phase on the login view
    pub fn new(api: Arc<dyn ArticleApi>, session: Arc<dyn SessionStore>) -> Self {
        let guard = RouteGuard::new(session.clone());
        Self {
            api,
            session,
            guard,
            busy: BusyIndicator::new(),
            state: UiState::default(),
        }
    }

    // ========================================================================
    // State accessors
    // ========================================================================

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn message(&self) -> &str {
        &self.state.message
    }

    pub fn articles(&self) -> &ArticleCollection {
        &self.state.articles
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_on()
    }

    /// Handle on the busy flag for observers outside the controller
    pub fn busy_indicator(&self) -> BusyIndicator {
        self.busy.clone()
    }

    pub fn current_article_id(&self) -> Option<i64> {
        self.state.current_article_id
    }

    /// Article selected for editing, if it is in the list
    pub fn current_article(&self) -> Option<&Article> {
        self.state
            .current_article_id
            .and_then(|id| self.state.articles.get(id))
    }

    /// Form for the current selection
    pub fn form(&self) -> ArticleForm {
        ArticleForm::for_article(self.current_article())
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select an article for editing, or clear the selection with `None`
    pub fn select_article(&mut self, article_id: Option<i64>) {
        self.state.current_article_id = article_id;
    }

    pub fn cancel_edit(&mut self) {
        self.select_article(None);
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Derive the session phase from the store, e.g. after a restart
    pub async fn restore_session(&mut self) -> SessionPhase {
        self.state.phase = match self.guard.token().await {
            Some(_) => SessionPhase::Authenticated,
            None => SessionPhase::Unauthenticated,
        };
        self.state.phase
    }

    /// Log in and, on success, open the article list
    ///
    /// A failed login leaves the client on the login view.
    pub async fn login(&mut self, username: &str, password: &str) -> Outcome {
        self.state.message.clear();
        self.state.phase = SessionPhase::Authenticating;

        let result = {
            let _busy = self.busy.acquire();
            self.authenticate(username, password).await
        };

        match result {
            Ok(message) => {
                tracing::info!("Logged in as {}", username);
                self.state.phase = SessionPhase::Authenticated;
                self.state.message = message;
                // The list view loads its articles as soon as it is shown
                match self.navigate(View::Articles).await {
                    redirected @ Outcome::Redirected(_) => redirected,
                    _ => Outcome::Completed,
                }
            }
            Err(e) => {
                tracing::warn!("Login failed: {:#}", e);
                self.state.phase = SessionPhase::Unauthenticated;
                self.state.message = MSG_LOGIN_FAILED.to_string();
                Outcome::Failed
            }
        }
    }

    async fn authenticate(&self, username: &str, password: &str) -> anyhow::Result<String> {
        let response = self.api.login(username, password).await?;
        let token = SessionToken::new(response.token)?;
        self.session.set_token(&token).await?;
        Ok(response.message)
    }

    /// Forget the session and return to the login view
    pub async fn logout(&mut self) -> Outcome {
        if let Err(e) = self.session.clear_token().await {
            tracing::warn!("Failed to clear session token: {:#}", e);
        }
        self.reset_session();
        self.state.message = MSG_GOODBYE.to_string();
        tracing::info!("Logged out");
        Outcome::Completed
    }

    /// Show a view, going through the route guard
    ///
    /// Opening the article list fetches it.
    pub async fn navigate(&mut self, view: View) -> Outcome {
        let resolved = self.guard.resolve(view).await;
        self.state.view = resolved;

        if resolved != view {
            self.state.phase = SessionPhase::Unauthenticated;
            return Outcome::Redirected(resolved);
        }
        if resolved.is_protected() {
            // The guard found a token
            self.state.phase = SessionPhase::Authenticated;
        }
        if resolved == View::Articles {
            return self.get_articles().await;
        }
        Outcome::Completed
    }

    // ========================================================================
    // Articles
    // ========================================================================

    /// Replace the article list with the server's
    pub async fn get_articles(&mut self) -> Outcome {
        self.state.message.clear();
        let _busy = self.busy.acquire();

        let token = match self.require_token().await {
            Some(token) => token,
            None => return Outcome::Redirected(View::Login),
        };

        match self.api.list_articles(&token).await {
            Ok(response) => {
                tracing::debug!("Fetched {} articles", response.articles.len());
                self.state.articles.replace_all(response.articles);
                self.state.message = response.message;
                Outcome::Completed
            }
            Err(e) => self.fail(e, MSG_LIST_FAILED).await,
        }
    }

    /// Create an article and append it to the list
    pub async fn post_article(&mut self, draft: &ArticleDraft) -> Outcome {
        self.state.message.clear();
        let _busy = self.busy.acquire();

        let token = match self.require_token().await {
            Some(token) => token,
            None => return Outcome::Redirected(View::Login),
        };
        let payload = match self.validate(draft) {
            Some(payload) => payload,
            None => return Outcome::Invalid,
        };

        match self.api.create_article(&token, &payload).await {
            Ok(response) => {
                tracing::info!("Created article {}", response.article.article_id);
                self.state.articles.push(response.article);
                self.state.message = response.message;
                Outcome::Completed
            }
            Err(e) => self.fail(e, MSG_CREATE_FAILED).await,
        }
    }

    /// Update the article selected for editing
    ///
    /// Does nothing unless `article_id` is the current selection.
    pub async fn update_article(&mut self, article_id: i64, draft: &ArticleDraft) -> Outcome {
        if self.state.current_article_id != Some(article_id) {
            tracing::debug!(
                "Ignoring update of article {}: selection is {:?}",
                article_id,
                self.state.current_article_id
            );
            return Outcome::StaleSelection;
        }

        self.state.message.clear();
        let _busy = self.busy.acquire();

        let token = match self.require_token().await {
            Some(token) => token,
            None => return Outcome::Redirected(View::Login),
        };
        let payload = match self.validate(draft) {
            Some(payload) => payload,
            None => return Outcome::Invalid,
        };

        match self.api.update_article(&token, article_id, &payload).await {
            Ok(response) => {
                tracing::info!("Updated article {}", article_id);
                if !self.state.articles.replace(article_id, response.article) {
                    tracing::debug!("Updated article {} is not in the list", article_id);
                }
                self.state.message = response.message;
                Outcome::Completed
            }
            Err(e) => self.fail(e, MSG_UPDATE_FAILED).await,
        }
    }

    /// Delete an article and drop it from the list
    pub async fn delete_article(&mut self, article_id: i64) -> Outcome {
        self.state.message.clear();
        let _busy = self.busy.acquire();

        let token = match self.require_token().await {
            Some(token) => token,
            None => return Outcome::Redirected(View::Login),
        };

        match self.api.delete_article(&token, article_id).await {
            Ok(response) => {
                tracing::info!("Deleted article {}", article_id);
                self.state.articles.remove(article_id);
                if self.state.current_article_id == Some(article_id) {
                    self.state.current_article_id = None;
                }
                self.state.message = response.message;
                Outcome::Completed
            }
            Err(e) => self.fail(e, MSG_DELETE_FAILED).await,
        }
    }

    /// Dispatch an explicit create or update request
    pub async fn submit(&mut self, request: ArticleRequest) -> Outcome {
        match request {
            ArticleRequest::Create(draft) => self.post_article(&draft).await,
            ArticleRequest::Update { article_id, draft } => {
                self.update_article(article_id, &draft).await
            }
        }
    }

    /// Submit the article form
    ///
    /// Updates the selected article if there is one, creates otherwise.
    /// A selection that is no longer in the list sends nothing. The selection
    /// is cleared afterwards whatever the outcome.
    pub async fn submit_form(&mut self, draft: ArticleDraft) -> Outcome {
        let outcome = match self.state.current_article_id {
            Some(article_id) if self.current_article().is_none() => {
                tracing::debug!("Ignoring edit of article {}: not in the list", article_id);
                Outcome::StaleSelection
            }
            _ => {
                let request = ArticleRequest::for_selection(self.current_article(), draft);
                self.submit(request).await
            }
        };
        self.state.current_article_id = None;
        outcome
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Read the token, redirecting to login when there is none
    async fn require_token(&mut self) -> Option<SessionToken> {
        let token = self.guard.token().await;
        if token.is_none() {
            tracing::debug!("No session token, redirecting to login");
            self.state.phase = SessionPhase::Unauthenticated;
            self.state.view = View::Login;
        }
        token
    }

    fn validate(&mut self, draft: &ArticleDraft) -> Option<ArticlePayload> {
        match draft.validate() {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::debug!("Rejected article draft: {}", e);
                self.state.message = MSG_INVALID_ARTICLE.to_string();
                None
            }
        }
    }

    /// Turn a client error into a status message
    ///
    /// A 401 means the stored token is no good: it is cleared and the client
    /// goes back to the login view.
    async fn fail(&mut self, error: ClientError, message: &str) -> Outcome {
        if error.is_unauthorized() {
            tracing::warn!("Session rejected by server: {}", error);
            if let Err(e) = self.session.clear_token().await {
                tracing::warn!("Failed to clear session token: {:#}", e);
            }
            self.reset_session();
            self.state.message = MSG_SESSION_EXPIRED.to_string();
            return Outcome::Redirected(View::Login);
        }

        tracing::warn!("{}: {}", message, error);
        self.state.message = message.to_string();
        Outcome::Failed
    }

    fn reset_session(&mut self) {
        self.state.phase = SessionPhase::Unauthenticated;
        self.state.view = View::Login;
        self.state.articles = ArticleCollection::new();
        self.state.current_article_id = None;
    }
}
