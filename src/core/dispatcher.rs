//! # Request Dispatcher
//!
//! Runs the two backend calls and folds every possible result (including
//! transport failures) into the completion `Action` the reducer expects.
//! The functions never fail: a failure is just another outcome.

use log::{info, warn};

use crate::api::{LoginResponse, SearchResponse, ShopBackend};
use crate::core::action::{Action, INVALID_CREDENTIALS, LoginOutcome, Password, SearchOutcome};

pub async fn login(backend: &dyn ShopBackend, username: &str, password: &Password) -> Action {
    let outcome = match backend.login(username, password.expose()).await {
        Ok(response) => login_outcome(response),
        Err(e) => {
            warn!("Login via {} failed: {}", backend.name(), e);
            LoginOutcome::Failed
        }
    };
    Action::LoginFinished(outcome)
}

pub async fn search(backend: &dyn ShopBackend, request_id: u64, query: &str) -> Action {
    let outcome = match backend.search(query).await {
        Ok(response) => search_outcome(response),
        Err(e) => {
            warn!("Search {} via {} failed: {}", request_id, backend.name(), e);
            SearchOutcome::Failed
        }
    };
    info!("Search {} settled: {}", request_id, describe(&outcome));
    Action::SearchFinished {
        request_id,
        outcome,
    }
}

/// A success flag without a username is as good as a rejection.
pub fn login_outcome(response: LoginResponse) -> LoginOutcome {
    match response {
        LoginResponse {
            success: true,
            username: Some(username),
            ..
        } => LoginOutcome::Accepted { username },
        LoginResponse {
            error: Some(error), ..
        } if !error.is_empty() => LoginOutcome::Rejected(error),
        _ => LoginOutcome::Rejected(INVALID_CREDENTIALS.to_string()),
    }
}

/// An error text wins over products; an empty error text counts as absent.
pub fn search_outcome(response: SearchResponse) -> SearchOutcome {
    match response {
        SearchResponse {
            error: Some(error), ..
        } if !error.is_empty() => SearchOutcome::Error(error),
        SearchResponse {
            products: Some(products),
            ..
        } => SearchOutcome::Products(products),
        _ => SearchOutcome::Failed,
    }
}

fn describe(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Products(products) => format!("{} product(s)", products.len()),
        SearchOutcome::Error(e) => format!("backend error: {e}"),
        SearchOutcome::Failed => "transport failure".to_string(),
    }
}
