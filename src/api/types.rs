//! Wire types for the shop backend.
//!
//! ```text
//! POST /api/login   {username, password}  →  {success, username?, error?}
//! POST /api/search  {query}               →  {products} | {error}
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub username: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

/// Body of a search response. The backend sends exactly one of the two
/// fields; a body with neither is reported as a parse error by the client.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct SearchResponse {
    pub products: Option<Vec<Product>>,
    pub error: Option<String>,
}

/// Product identifiers come back as numbers from SQL-backed catalogs and
/// as strings from vector-store ones.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Prices are shown as sent. Most catalogs send numbers, some send
/// preformatted strings such as `"999.99"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Price::Number(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Number(n) => write!(f, "{n}"),
            Price::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A catalog entry, taken as the backend sends it. Text fields that come
/// back `null` read as empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub price: Price,
}

impl Product {
    /// Price as shown on a product card: `$999`, `$12.5`, `$999.99`.
    pub fn price_label(&self) -> String {
        format!("${}", self.price)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
