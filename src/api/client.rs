//! HTTP implementation of [`ShopBackend`] on top of `reqwest`.
//!
//! Replies are parsed as JSON whatever the status code: the login endpoint
//! answers a bad password with `401 {"error": "..."}` and that is a normal
//! rejection, not a transport failure. Only bodies that fail to parse are
//! turned into errors.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::{ApiError, ShopBackend};
use super::types::{LoginRequest, LoginResponse, SearchRequest, SearchResponse};

pub const LOGIN_PATH: &str = "/api/login";
pub const SEARCH_PATH: &str = "/api/search";

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Network(format!("request to {path} timed out"))
                } else {
                    ApiError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        debug!("POST {} -> {}", path, status);

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match serde_json::from_str::<R>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(e) if status.is_success() => {
                warn!("Unparseable body from {}: {}", path, e);
                Err(ApiError::Parse(e.to_string()))
            }
            Err(_) => {
                warn!("Backend error from {}: {} - {}", path, status, text);
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: text,
                })
            }
        }
    }
}

#[async_trait]
impl ShopBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!("Login request for user={}", username);
        self.post_json(LOGIN_PATH, &LoginRequest { username, password })
            .await
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        info!("Search request: query_len={}", query.len());
        let response: SearchResponse = self.post_json(SEARCH_PATH, &SearchRequest { query }).await?;

        if response.products.is_none() && response.error.is_none() {
            return Err(ApiError::Parse(
                "search response has neither products nor error".to_string(),
            ));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_name() {
        let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.name(), "http");
    }
}
