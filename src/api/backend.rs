use std::fmt;

use async_trait::async_trait;

use super::types::{LoginResponse, SearchResponse};

/// Errors that can occur while talking to the shop backend.
///
/// All variants are transport-level: the backend never got to answer with
/// a well-formed body. Backend-reported failures (`{"error": ...}`) are
/// successful calls and arrive inside the response types.
#[derive(Debug)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS setup).
    Config(String),
    /// Connection refused, DNS, timeout.
    Network(String),
    /// Non-2xx status whose body was not a JSON reply we understand.
    Api { status: u16, message: String },
    /// 2xx status but the body was not the expected JSON.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[async_trait]
pub trait ShopBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Submits credentials. Rejections come back as `Ok` with `success: false`.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Runs a product search. The response carries either products or an error text.
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status() {
        let err = ApiError::Api {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 502): Bad Gateway");
    }

    #[test]
    fn test_display_network() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
