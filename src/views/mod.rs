//! Terminal views
//!
//! Renders client state as plain text:
//! - Spinner line, shown only while a request is outstanding
//! - Session phase line
//! - Status message line
//! - Login prompt, or the article form heading and the article list

use crate::models::{Article, ArticleCollection, ArticleForm, SessionPhase};
use crate::routes::View;
use crate::services::ArticleController;

pub const SPINNER_TEXT: &str = "Please wait...";
pub const EMPTY_LIST_TEXT: &str = "No articles yet";

/// Spinner line, present iff busy
pub fn spinner(busy: bool) -> Option<&'static str> {
    busy.then_some(SPINNER_TEXT)
}

pub fn session_line(phase: SessionPhase) -> String {
    format!("Session: {}", phase)
}

/// Status message line, absent when there is nothing to say
pub fn message_line(message: &str) -> Option<String> {
    let message = message.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// One article entry; the article selected for editing is marked
pub fn article_entry(article: &Article, selected: bool) -> String {
    let marker = if selected { '>' } else { ' ' };
    format!(
        "{} [{}] {} ({})\n    {}",
        marker, article.article_id, article.title, article.topic, article.text
    )
}

/// The article list, in collection order
pub fn article_list(articles: &ArticleCollection, current: Option<i64>) -> String {
    if articles.is_empty() {
        return EMPTY_LIST_TEXT.to_string();
    }
    articles
        .iter()
        .map(|article| article_entry(article, current == Some(article.article_id)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Form heading plus the pre-filled values when editing
pub fn form_summary(form: &ArticleForm) -> String {
    let mut out = format!("== {} ==", form.heading());
    if form.is_submit_disabled() {
        out.push_str(" (submit disabled)");
    }
    if form.is_editing() {
        let values = form.values();
        out.push_str(&format!(
            "\n  title: {}\n  text:  {}\n  topic: {}",
            values.title, values.text, values.topic
        ));
    }
    out
}

/// Whole screen for the controller's current view
pub fn render(controller: &ArticleController) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(spinner) = spinner(controller.is_busy()) {
        lines.push(spinner.to_string());
    }
    lines.push(session_line(controller.phase()));
    if let Some(message) = message_line(controller.message()) {
        lines.push(message);
    }

    match controller.view() {
        View::Login => lines.push("== Login ==".to_string()),
        View::Articles => {
            lines.push(form_summary(&controller.form()));
            lines.push("== Articles ==".to_string());
            lines.push(article_list(
                controller.articles(),
                controller.current_article_id(),
            ));
        }
    }

    lines.join("\n")
}
