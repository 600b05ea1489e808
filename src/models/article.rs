//! Article model
//!
//! This module provides:
//! - `Article` entity as returned by the articles API
//! - `Topic` enum for the fixed set of article topics
//! - `ArticleDraft` (raw form values) and `ArticlePayload` (validated request body)
//! - `ArticleRequest` tagged variant choosing between create and update
//! - `ArticleCollection` holding the in-memory article list

use serde::{Deserialize, Serialize};

/// Maximum title length in characters
pub const MAX_TITLE_LEN: usize = 50;

/// Maximum text length in characters
pub const MAX_TEXT_LEN: usize = 200;

/// Article entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Server-assigned identifier
    pub article_id: i64,
    /// Article title
    pub title: String,
    /// Article body text
    pub text: String,
    /// Article topic
    pub topic: Topic,
}

/// Article topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    JavaScript,
    React,
    Node,
}

impl Topic {
    /// All topics, in the order they are offered to the user
    pub const ALL: [Topic; 3] = [Topic::JavaScript, Topic::React, Topic::Node];

    /// Convert topic to its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::JavaScript => "JavaScript",
            Topic::React => "React",
            Topic::Node => "Node",
        }
    }

    /// Parse topic from its wire representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "JavaScript" => Some(Topic::JavaScript),
            "React" => Some(Topic::React),
            "Node" => Some(Topic::Node),
            _ => None,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a draft can not be turned into a request body
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is empty (after trimming)
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// A field exceeds its maximum length
    #[error("Field '{field}' must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Topic is not one of the known topics
    #[error("Unknown topic: {0}")]
    UnknownTopic(String),
}

/// Raw article form values
///
/// An unselected topic is represented by the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub text: String,
    pub topic: String,
}

impl ArticleDraft {
    /// Create a new draft from raw values
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            topic: topic.into(),
        }
    }

    /// Whether every field holds something
    ///
    /// This is the submit-button check; it does not trim or check lengths.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.text.is_empty() && !self.topic.is_empty()
    }

    /// Validate the draft and build the request body
    ///
    /// Title and text are trimmed before any check.
    pub fn validate(&self) -> Result<ArticlePayload, ValidationError> {
        let title = self.title.trim();
        let text = self.text.trim();

        if title.is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if text.is_empty() {
            return Err(ValidationError::EmptyField("text"));
        }
        if self.topic.is_empty() {
            return Err(ValidationError::EmptyField("topic"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "text",
                max: MAX_TEXT_LEN,
            });
        }
        let topic = Topic::from_str(&self.topic)
            .ok_or_else(|| ValidationError::UnknownTopic(self.topic.clone()))?;

        Ok(ArticlePayload {
            title: title.to_string(),
            text: text.to_string(),
            topic,
        })
    }
}

impl From<&Article> for ArticleDraft {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            text: article.text.clone(),
            topic: article.topic.as_str().to_string(),
        }
    }
}

/// Validated request body for create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePayload {
    pub title: String,
    pub text: String,
    pub topic: Topic,
}

/// Create or update, chosen explicitly by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleRequest {
    /// Create a new article; the server assigns the identifier
    Create(ArticleDraft),
    /// Replace the article with the given identifier
    Update { article_id: i64, draft: ArticleDraft },
}

impl ArticleRequest {
    /// Build the request implied by the current edit selection
    pub fn for_selection(selected: Option<&Article>, draft: ArticleDraft) -> Self {
        match selected {
            Some(article) => Self::Update {
                article_id: article.article_id,
                draft,
            },
            None => Self::Create(draft),
        }
    }
}

/// Ordered, in-memory list of articles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleCollection {
    items: Vec<Article>,
}

impl ArticleCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry with a freshly fetched list
    pub fn replace_all(&mut self, articles: Vec<Article>) {
        self.items = articles;
    }

    /// Append a newly created article
    pub fn push(&mut self, article: Article) {
        self.items.push(article);
    }

    /// Replace the entry with the given identifier
    ///
    /// Returns false when no entry matched.
    pub fn replace(&mut self, article_id: i64, article: Article) -> bool {
        match self.items.iter_mut().find(|a| a.article_id == article_id) {
            Some(slot) => {
                *slot = article;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with the given identifier
    pub fn remove(&mut self, article_id: i64) -> Option<Article> {
        let index = self.items.iter().position(|a| a.article_id == article_id)?;
        Some(self.items.remove(index))
    }

    /// Find an entry by identifier
    pub fn get(&self, article_id: i64) -> Option<&Article> {
        self.items.iter().find(|a| a.article_id == article_id)
    }

    /// Check whether an entry with the identifier exists
    pub fn contains(&self, article_id: i64) -> bool {
        self.get(article_id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Article] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<Article>> for ArticleCollection {
    fn from(items: Vec<Article>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a ArticleCollection {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
