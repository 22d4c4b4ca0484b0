//! # Core Application Logic
//!
//! This module contains shopbot's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Reducer is pure │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ dispatcher │      │  storage   │
//!     │  Adapter   │      │ (HTTP via  │      │ (session   │
//!     │ (ratatui)  │      │   api/)    │      │  record)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all client state in one place
//! - [`action`]: The `Action` enum, `Effect` enum and `update()`
//! - [`conversation`]: The append-only chat log
//! - [`dispatcher`]: Backend calls folded into completion actions
//! - [`session`]: Persisting the logged-in identity
//! - [`storage`]: The key-value storage capability
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod conversation;
pub mod dispatcher;
pub mod session;
pub mod state;
pub mod storage;
