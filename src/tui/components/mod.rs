//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: chat header with username and status
//! - `Message`: a single chat bubble
//! - `Notice`: blocking popup
//! - `LoginScreen`: view over the persistent `LoginForm`
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that own state living in `TuiState` and emit events:
//! - `TextField`: single-line input (query box, login fields)
//! - `LoginForm`: username/password pair with focus handling
//! - `MessageListState`: scroll position of the conversation
//! - `ProductGridState`: scroll position of the product cards
//!
//! Components never read `App` directly; the caller passes what they need.
//! This keeps them testable against a `TestBackend` without a running app.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (chat header)
//! ├── text_field.rs    (single-line input)
//! ├── login_form.rs    (login view)
//! ├── message.rs       (single chat bubble)
//! ├── message_list.rs  (scrollable conversation)
//! ├── product_grid.rs  (scrollable product cards)
//! └── notice.rs        (blocking popup)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod login_form;
pub mod message;
pub mod message_list;
pub mod notice;
pub mod product_grid;
pub mod text_field;

pub use login_form::{LoginEvent, LoginForm, LoginScreen};
pub use message_list::{MessageList, MessageListState};
pub use notice::Notice;
pub use product_grid::{ProductGrid, ProductGridState};
pub use text_field::{FieldEvent, TextField};
