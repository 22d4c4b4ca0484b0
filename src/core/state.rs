//! # Application State
//!
//! Core client state. Domain data only: no terminal types here. Presentation
//! state (input buffers, scroll offsets, focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── session: Option<Session>     // logged-in identity (None = login view)
//! ├── conversation: Conversation   // chat log, append-only
//! ├── products: Vec<Product>       // most recent successful search
//! ├── is_loading: bool             // waiting on the backend
//! ├── in_flight: Option<u64>       // request id of the search being awaited
//! ├── notice: Option<String>       // blocking notice (login failures)
//! └── status_message: String       // status line text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::Product;
use crate::core::conversation::Conversation;
use crate::core::session::Session;

#[derive(Debug, Clone, Default)]
pub struct App {
    pub session: Option<Session>,
    pub conversation: Conversation,
    pub products: Vec<Product>,
    pub is_loading: bool,
    /// Search completions carrying any other id are stale and dropped.
    pub in_flight: Option<u64>,
    pub notice: Option<String>,
    pub status_message: String,
    next_request_id: u64,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Hands out monotonically increasing search request ids.
    pub(crate) fn allocate_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }
}
