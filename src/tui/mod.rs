//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and executes the
//! `Effect`s the reducer hands back.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! - `Login` / `Search`: spawned on tokio; the dispatcher's completion
//!   action comes back over an `mpsc` channel and is drained every tick.
//! - `PersistSession` / `EraseSession`: applied to the key-value store
//!   synchronously.
//! - A search task is aborted as soon as the reducer stops waiting for it
//!   (reset, logout).
//!
//! ## Redraw Strategy
//!
//! Draws only after an event or a completion arrived. While a request is
//! out the poll timeout drops so the loading line stays responsive.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::api::{HttpBackend, ShopBackend};
use crate::core::action::{Action, Effect, Password, update};
use crate::core::config::{ResolvedConfig, StorageLocation};
use crate::core::dispatcher;
use crate::core::session;
use crate::core::state::App;
use crate::core::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    FieldEvent, LoginEvent, LoginForm, MessageListState, ProductGridState, TextField,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

pub const QUERY_MAX_CHARS: usize = 1000;
pub const QUERY_PLACEHOLDER: &str = "Type your query (e.g., 'show laptops under $1000')";

const BUSY_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Pane that receives scroll keys in the chat view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollTarget {
    #[default]
    Conversation,
    Products,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub login_form: LoginForm,
    pub query_input: TextField,
    pub message_list: MessageListState,
    pub product_grid: ProductGridState,
    pub scroll_target: ScrollTarget,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            login_form: LoginForm::new(),
            query_input: TextField::new()
                .max_chars(QUERY_MAX_CHARS)
                .placeholder(QUERY_PLACEHOLDER),
            message_list: MessageListState::new(),
            product_grid: ProductGridState::new(),
            scroll_target: ScrollTarget::default(),
        }
    }

    /// Back to a blank login screen after logout.
    fn reset_for_login(&mut self) {
        self.login_form.password.clear();
        self.login_form.focus = components::login_form::LoginField::Username;
        self.query_input.clear();
        self.message_list = MessageListState::new();
        self.product_grid = ProductGridState::new();
        self.scroll_target = ScrollTarget::default();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events are reported so they can be filtered out; terminals
        // without the keyboard protocol ignore the flags
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the HTTP backend from the resolved config.
pub fn build_backend(config: &ResolvedConfig) -> std::io::Result<Arc<dyn ShopBackend>> {
    let backend = HttpBackend::new(&config.api_base_url, config.request_timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(Arc::new(backend))
}

/// Build the session store from the resolved config.
pub fn build_store(location: &StorageLocation) -> Box<dyn KeyValueStore> {
    match location {
        StorageLocation::File(path) => Box::new(FileStore::new(path.clone())),
        StorageLocation::Memory => Box::new(MemoryStore::new()),
    }
}

/// Owns everything effects need: the backend, the store, the completion
/// channel and the handle of the search currently awaited.
struct EffectRunner {
    backend: Arc<dyn ShopBackend>,
    store: Box<dyn KeyValueStore>,
    tx: mpsc::Sender<Action>,
    search_handle: Option<AbortHandle>,
}

impl EffectRunner {
    /// Feeds `action` through the reducer and executes the resulting
    /// effect. Returns true when the app should quit.
    fn dispatch(&mut self, app: &mut App, tui: &mut TuiState, action: Action) -> bool {
        debug!("Dispatching: {:?}", action);
        let effect = update(app, action);

        let quit = match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::Login { username, password } => {
                self.spawn_login(username, password);
                false
            }
            Effect::Search { request_id, query } => {
                tui.query_input.clear();
                tui.product_grid.scroll_to_top();
                self.search_handle = Some(self.spawn_search(request_id, query));
                false
            }
            effect @ (Effect::PersistSession(_) | Effect::EraseSession) => {
                if let Err(e) = session::apply_effect(self.store.as_ref(), &effect) {
                    warn!("Session storage failed: {}", e);
                }
                match effect {
                    Effect::EraseSession => tui.reset_for_login(),
                    _ => tui.login_form.password.clear(),
                }
                false
            }
        };

        if !app.is_searching()
            && let Some(handle) = self.search_handle.take()
        {
            if !handle.is_finished() {
                info!("Aborting abandoned search task");
            }
            handle.abort();
        }

        quit
    }

    fn spawn_login(&self, username: String, password: Password) {
        info!("Spawning login request for user={}", username);
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = dispatcher::login(backend.as_ref(), &username, &password).await;
            if tx.send(action).is_err() {
                warn!("Failed to send login result: receiver dropped");
            }
        });
    }

    fn spawn_search(&self, request_id: u64, query: String) -> AbortHandle {
        info!("Spawning search request {}", request_id);
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = dispatcher::search(backend.as_ref(), request_id, &query).await;
            if tx.send(action).is_err() {
                warn!("Failed to send search result {}: receiver dropped", request_id);
            }
        })
        .abort_handle()
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config)?;
    let store = build_store(&config.storage);
    let (tx, rx) = mpsc::channel();

    let mut app = App::new();
    let mut tui = TuiState::new();
    let mut runner = EffectRunner {
        backend,
        store,
        tx,
        search_handle: None,
    };

    if let Some(restored) = session::restore(runner.store.as_ref()) {
        runner.dispatch(&mut app, &mut tui, Action::SessionRestored(restored));
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true;

    'event_loop: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading { BUSY_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = handle_event(&app, &mut tui, event)
                && runner.dispatch(&mut app, &mut tui, action)
            {
                break 'event_loop;
            }
        }

        // Completions from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if runner.dispatch(&mut app, &mut tui, action) {
                break 'event_loop;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Routes one terminal event to the component that owns it and returns
/// the core action it produced, if any.
fn handle_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    // A visible notice swallows everything except its own dismissal
    if app.notice.is_some() {
        return matches!(event, TuiEvent::Submit | TuiEvent::Escape)
            .then_some(Action::DismissNotice);
    }

    if !app.is_logged_in() {
        if matches!(event, TuiEvent::Escape) {
            return Some(Action::Quit);
        }
        return tui.login_form.handle_event(&event).map(|login_event| match login_event {
            LoginEvent::Submit { username, password } => Action::LoginSubmitted {
                username,
                password: Password::new(password),
            },
        });
    }

    match event {
        TuiEvent::Reset => Some(Action::Reset),
        TuiEvent::Logout => Some(Action::Logout),
        TuiEvent::FocusNext => {
            tui.scroll_target = match tui.scroll_target {
                ScrollTarget::Conversation if !app.products.is_empty() => ScrollTarget::Products,
                _ => ScrollTarget::Conversation,
            };
            None
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            if tui.scroll_target == ScrollTarget::Products && !app.products.is_empty() {
                tui.product_grid.handle_event(&event);
            } else {
                tui.message_list.handle_event(&event);
            }
            None
        }
        _ => match tui.query_input.handle_event(&event) {
            Some(FieldEvent::Submit) => Some(Action::Submit(tui.query_input.text().to_string())),
            _ => None,
        },
    }
}
