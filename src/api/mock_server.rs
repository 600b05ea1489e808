//! In-process articles server for tests
//!
//! Serves the same routes as the real API on an ephemeral local port:
//! credentials `foo` / `12345678` log in with token `abc123`, and the
//! article list starts with two seeded entries.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

use super::responses::LoginRequest;
use crate::models::{Article, ArticlePayload, Topic};

pub const USERNAME: &str = "foo";
pub const PASSWORD: &str = "12345678";
pub const TOKEN: &str = "abc123";

/// Shared server state, inspectable from tests
#[derive(Clone)]
pub struct MockState {
    pub articles: Arc<Mutex<Vec<Article>>>,
    pub next_id: Arc<Mutex<i64>>,
    /// Number of requests that reached an article route
    pub article_requests: Arc<Mutex<usize>>,
}

impl MockState {
    fn seeded() -> Self {
        Self {
            articles: Arc::new(Mutex::new(vec![
                Article {
                    article_id: 1,
                    title: "Closures".to_string(),
                    text: "Functions that remember their scope".to_string(),
                    topic: Topic::JavaScript,
                },
                Article {
                    article_id: 2,
                    title: "Hooks".to_string(),
                    text: "useState and useEffect".to_string(),
                    topic: Topic::React,
                },
            ])),
            next_id: Arc::new(Mutex::new(3)),
            article_requests: Arc::new(Mutex::new(0)),
        }
    }

    pub fn snapshot(&self) -> Vec<Article> {
        self.articles.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        *self.article_requests.lock().unwrap()
    }

    fn count(&self) {
        *self.article_requests.lock().unwrap() += 1;
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Ouch: jwt malformed"})),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|h| h == TOKEN)
        .unwrap_or(false)
}

async fn login(Json(body): Json<LoginRequest>) -> Response {
    if body.username == USERNAME && body.password == PASSWORD {
        Json(json!({
            "token": TOKEN,
            "message": format!("Here are your articles, {}!", body.username),
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn list_articles(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.count();
    if !authorized(&headers) {
        return unauthorized();
    }
    let articles = state.snapshot();
    Json(json!({"articles": articles, "message": "Here are your articles, foo!"})).into_response()
}

async fn create_article(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(payload): Json<ArticlePayload>,
) -> Response {
    state.count();
    if !authorized(&headers) {
        return unauthorized();
    }
    let article_id = {
        let mut next = state.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    };
    let article = Article {
        article_id,
        title: payload.title,
        text: payload.text,
        topic: payload.topic,
    };
    state.articles.lock().unwrap().push(article.clone());
    (
        StatusCode::CREATED,
        Json(json!({"article": article, "message": "Well done, foo. Great article!"})),
    )
        .into_response()
}

async fn update_article(
    State(state): State<MockState>,
    Path(article_id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<ArticlePayload>,
) -> Response {
    state.count();
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut articles = state.articles.lock().unwrap();
    match articles.iter_mut().find(|a| a.article_id == article_id) {
        Some(slot) => {
            slot.title = payload.title;
            slot.text = payload.text;
            slot.topic = payload.topic;
            let article = slot.clone();
            Json(json!({"article": article, "message": "Nice update, foo!"})).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("Article {} not found", article_id)})),
        )
            .into_response(),
    }
}

async fn delete_article(
    State(state): State<MockState>,
    Path(article_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.count();
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut articles = state.articles.lock().unwrap();
    let before = articles.len();
    articles.retain(|a| a.article_id != article_id);
    if articles.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("Article {} not found", article_id)})),
        )
            .into_response();
    }
    Json(json!({"message": format!("Article {} was deleted, foo!", article_id)})).into_response()
}

/// Bind the mock server on an ephemeral port
///
/// Returns the API base URL (ending in `/api`) and the shared state.
pub async fn spawn() -> (String, MockState) {
    let state = MockState::seeded();
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/articles", get(list_articles).post(create_article))
        .route(
            "/api/articles/{id}",
            put(update_article).delete(delete_article),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });

    (format!("http://{}/api", addr), state)
}

/// Bind a server whose every route answers after `delay`
pub async fn spawn_slow(delay: std::time::Duration) -> String {
    let app = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        StatusCode::OK
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind slow server");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Slow server failed");
    });

    format!("http://{}/api", addr)
}
