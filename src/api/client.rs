//! HTTP implementation of the articles API
//!
//! Endpoints (relative to the configured base URL):
//! - POST /login - exchange credentials for a token
//! - GET /articles - list articles
//! - POST /articles - create an article
//! - PUT /articles/{id} - update an article
//! - DELETE /articles/{id} - delete an article
//!
//! The session token is sent verbatim in the `Authorization` header.

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::ClientError;
use super::responses::{
    ArticleResponse, ArticlesResponse, ErrorBody, LoginRequest, LoginResponse, MessageResponse,
};
use super::ArticleApi;
use crate::config::ApiConfig;
use crate::models::{ArticlePayload, SessionToken};

/// reqwest-based articles API client
#[derive(Debug, Clone)]
pub struct HttpArticleApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpArticleApi {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    fn articles_url(&self) -> String {
        format!("{}/articles", self.base_url)
    }

    fn article_url(&self, article_id: i64) -> String {
        format!("{}/articles/{}", self.base_url, article_id)
    }
}

/// Decode the body when the status is the expected success code
///
/// Any other status becomes an error carrying the server's message.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<T, ClientError> {
    let status = response.status();
    if status == expected {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = ErrorBody::message_from(&body);
    tracing::debug!("Unexpected response {} (expected {}): {}", status, expected, message);

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized { message });
    }
    Err(ClientError::UnexpectedStatus {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ArticleApi for HttpArticleApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let url = self.login_url();
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        read_json(response, StatusCode::OK).await
    }

    async fn list_articles(&self, token: &SessionToken) -> Result<ArticlesResponse, ClientError> {
        let url = self.articles_url();
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, token.as_str())
            .send()
            .await?;

        read_json(response, StatusCode::OK).await
    }

    async fn create_article(
        &self,
        token: &SessionToken,
        payload: &ArticlePayload,
    ) -> Result<ArticleResponse, ClientError> {
        let url = self.articles_url();
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, token.as_str())
            .json(payload)
            .send()
            .await?;

        read_json(response, StatusCode::CREATED).await
    }

    async fn update_article(
        &self,
        token: &SessionToken,
        article_id: i64,
        payload: &ArticlePayload,
    ) -> Result<ArticleResponse, ClientError> {
        let url = self.article_url(article_id);
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .header(header::AUTHORIZATION, token.as_str())
            .json(payload)
            .send()
            .await?;

        read_json(response, StatusCode::OK).await
    }

    async fn delete_article(
        &self,
        token: &SessionToken,
        article_id: i64,
    ) -> Result<MessageResponse, ClientError> {
        let url = self.article_url(article_id);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .header(header::AUTHORIZATION, token.as_str())
            .send()
            .await?;

        read_json(response, StatusCode::OK).await
    }
}
