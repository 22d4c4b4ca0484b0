pub mod backend;
pub mod client;
pub mod types;

pub use backend::{ApiError, ShopBackend};
pub use client::HttpBackend;
pub use types::{LoginResponse, Price, Product, ProductId, SearchResponse};
