//! Article form state
//!
//! Tracks the values typed into the article form and whether the form is in
//! create or edit mode. The form starts empty; selecting an article pre-fills
//! it and switches to edit mode.

use super::article::{Article, ArticleDraft, ArticleRequest};

/// Article form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleForm {
    values: ArticleDraft,
    editing: Option<i64>,
}

impl ArticleForm {
    /// Create an empty form in create mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the form for the current selection
    ///
    /// `None` gives an empty create form.
    pub fn for_article(article: Option<&Article>) -> Self {
        match article {
            Some(article) => Self {
                values: ArticleDraft::from(article),
                editing: Some(article.article_id),
            },
            None => Self::new(),
        }
    }

    pub fn values(&self) -> &ArticleDraft {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut ArticleDraft {
        &mut self.values
    }

    /// Identifier of the article being edited, if any
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Form heading
    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Article"
        } else {
            "Create Article"
        }
    }

    /// Submit is disabled while any field is empty
    pub fn is_submit_disabled(&self) -> bool {
        !self.values.is_complete()
    }

    /// Turn the form into a request and reset it to an empty create form
    pub fn take_request(&mut self) -> ArticleRequest {
        let draft = std::mem::take(&mut self.values);
        match self.editing.take() {
            Some(article_id) => ArticleRequest::Update { article_id, draft },
            None => ArticleRequest::Create(draft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Topic;

    fn sample() -> Article {
        Article {
            article_id: 3,
            title: "Hooks".to_string(),
            text: "useState and friends".to_string(),
            topic: Topic::React,
        }
    }

    #[test]
    fn test_empty_form_is_create_mode() {
        let form = ArticleForm::for_article(None);
        assert_eq!(form.heading(), "Create Article");
        assert!(form.is_submit_disabled());
        assert_eq!(form.editing(), None);
    }

    #[test]
    fn test_selected_article_prefills_form() {
        let article = sample();
        let form = ArticleForm::for_article(Some(&article));
        assert_eq!(form.heading(), "Edit Article");
        assert_eq!(form.values().title, "Hooks");
        assert_eq!(form.values().topic, "React");
        assert!(!form.is_submit_disabled());
    }

    #[test]
    fn test_take_request_resets_form() {
        let article = sample();
        let mut form = ArticleForm::for_article(Some(&article));
        form.values_mut().title = "Hooks, revisited".to_string();

        let request = form.take_request();
        match request {
            ArticleRequest::Update { article_id, draft } => {
                assert_eq!(article_id, 3);
                assert_eq!(draft.title, "Hooks, revisited");
            }
            other => panic!("expected update, got {:?}", other),
        }
        assert_eq!(form, ArticleForm::new());
    }

    #[test]
    fn test_submit_disabled_until_topic_selected() {
        let mut form = ArticleForm::new();
        form.values_mut().title = "T".to_string();
        form.values_mut().text = "Body".to_string();
        assert!(form.is_submit_disabled());
        form.values_mut().topic = "Node".to_string();
        assert!(!form.is_submit_disabled());
        assert!(matches!(form.take_request(), ArticleRequest::Create(_)));
    }
}
