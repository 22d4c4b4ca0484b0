//! # Actions
//!
//! Everything that can happen in the client becomes an `Action`.
//! User presses Enter in the query box? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::SearchFinished { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an [`Effect`] describing the I/O the adapter must
//! perform next. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::fmt;

use log::{debug, info};

use crate::api::Product;
use crate::core::conversation::{ChatEntry, welcome_message};
use crate::core::session::Session;
use crate::core::state::App;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_FAILED: &str = "Error during login";
pub const SEARCH_FAILED: &str = "Error fetching products.";
pub const NO_PRODUCTS: &str = "No products found. Try another search.";

pub fn found_message(count: usize) -> String {
    if count == 0 {
        NO_PRODUCTS.to_string()
    } else {
        format!("Found {count} products!")
    }
}

/// A password that never shows up in `Debug` output (actions and effects
/// are logged).
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Accepted { username: String },
    /// Backend said no; carries the text to show.
    Rejected(String),
    /// Transport failure.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Products(Vec<Product>),
    /// Backend-reported error text.
    Error(String),
    /// Transport failure or a body we could not use.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Startup found a persisted session.
    SessionRestored(Session),
    LoginSubmitted { username: String, password: Password },
    LoginFinished(LoginOutcome),
    /// Raw query text from the input box.
    Submit(String),
    SearchFinished { request_id: u64, outcome: SearchOutcome },
    Reset,
    Logout,
    DismissNotice,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Login { username: String, password: Password },
    Search { request_id: u64, query: String },
    PersistSession(Session),
    EraseSession,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SessionRestored(session) => {
            app.status_message = format!("Signed in as {}", session.username);
            app.session = Some(session);
            Effect::None
        }

        Action::LoginSubmitted { username, password } => {
            if app.is_loading || app.is_logged_in() {
                return Effect::None;
            }
            app.is_loading = true;
            app.notice = None;
            app.status_message = String::from("Logging in...");
            Effect::Login { username, password }
        }

        Action::LoginFinished(outcome) => {
            app.is_loading = false;
            app.status_message.clear();
            match outcome {
                LoginOutcome::Accepted { username } => {
                    info!("Login accepted for user={}", username);
                    let session = Session::new(username.as_str());
                    app.session = Some(session.clone());
                    app.notice = None;
                    app.conversation
                        .append(ChatEntry::bot(welcome_message(&username)));
                    app.status_message = format!("Signed in as {username}");
                    Effect::PersistSession(session)
                }
                LoginOutcome::Rejected(message) => {
                    info!("Login rejected: {}", message);
                    app.notice = Some(message);
                    Effect::None
                }
                LoginOutcome::Failed => {
                    app.notice = Some(LOGIN_FAILED.to_string());
                    Effect::None
                }
            }
        }

        Action::Submit(text) => {
            if text.trim().is_empty() || !app.is_logged_in() {
                return Effect::None;
            }
            if app.is_searching() {
                app.status_message = String::from("Still searching, please wait...");
                return Effect::None;
            }
            app.conversation.append(ChatEntry::user(text.as_str()));
            app.is_loading = true;
            app.status_message.clear();
            let request_id = app.allocate_request_id();
            app.in_flight = Some(request_id);
            Effect::Search {
                request_id,
                query: text,
            }
        }

        Action::SearchFinished { request_id, outcome } => {
            if app.in_flight != Some(request_id) {
                debug!(
                    "Dropping stale search result (request_id={}, awaiting={:?})",
                    request_id, app.in_flight
                );
                return Effect::None;
            }
            app.in_flight = None;
            app.is_loading = false;

            let reply = match outcome {
                SearchOutcome::Products(products) => {
                    let reply = found_message(products.len());
                    app.products = products;
                    reply
                }
                SearchOutcome::Error(message) => message,
                SearchOutcome::Failed => SEARCH_FAILED.to_string(),
            };
            app.conversation.append(ChatEntry::bot(reply));
            Effect::None
        }

        Action::Reset => {
            let Some(username) = app.username().map(str::to_owned) else {
                return Effect::None;
            };
            app.products.clear();
            app.conversation.reset(&username);
            app.in_flight = None;
            app.is_loading = false;
            app.status_message.clear();
            Effect::None
        }

        Action::Logout => {
            if let Some(session) = app.session.take() {
                info!("Logging out user={}", session.username);
            }
            app.conversation.clear();
            app.products.clear();
            app.in_flight = None;
            app.is_loading = false;
            app.notice = None;
            app.status_message.clear();
            Effect::EraseSession
        }

        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
