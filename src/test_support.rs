//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, LoginResponse, Product, SearchResponse, ShopBackend};
use crate::core::session::Session;
use crate::core::state::App;

/// A canned backend: every call answers the same way and nothing touches
/// the network.
pub struct StubBackend {
    login: Option<LoginResponse>,
    search: Option<SearchResponse>,
    last_query: Mutex<Option<String>>,
}

impl StubBackend {
    /// Every call fails at the transport level.
    pub fn failing() -> Self {
        Self {
            login: None,
            search: None,
            last_query: Mutex::new(None),
        }
    }

    /// Accepts every login as `username`.
    pub fn accepting(username: &str) -> Self {
        Self {
            login: Some(LoginResponse {
                success: true,
                username: Some(username.to_string()),
                error: None,
            }),
            ..Self::failing()
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            search: Some(SearchResponse {
                products: Some(products),
                error: None,
            }),
            ..Self::failing()
        }
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().ok().and_then(|q| q.clone())
    }
}

#[async_trait]
impl ShopBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        match &self.login {
            Some(response) => Ok(LoginResponse {
                success: response.success,
                username: response.username.clone(),
                error: response.error.clone(),
            }),
            None => Err(ApiError::Network("stub backend is offline".to_string())),
        }
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query.to_string());
        }
        match &self.search {
            Some(response) => Ok(SearchResponse {
                products: response.products.clone(),
                error: response.error.clone(),
            }),
            None => Err(ApiError::Network("stub backend is offline".to_string())),
        }
    }
}

/// Creates a logged-out App.
pub fn test_app() -> App {
    App::new()
}

/// Creates an App that already holds a session for `username`.
pub fn logged_in_app(username: &str) -> App {
    let mut app = App::new();
    app.session = Some(Session::new(username));
    app
}
