//! Data models
//!
//! This module contains the data structures shared by the client:
//! - API entities (Article, Topic)
//! - Form values and validated request bodies
//! - Session token and authentication phase

mod article;
mod form;
mod session;

pub use article::{
    Article, ArticleCollection, ArticleDraft, ArticlePayload, ArticleRequest, Topic,
    ValidationError, MAX_TEXT_LEN, MAX_TITLE_LEN,
};
pub use form::ArticleForm;
pub use session::{SessionPhase, SessionToken, TokenError};
