//! # TitleBar Component
//!
//! Header of the chat view: application name, the logged-in user and the
//! transient status message from `App::status_message`.
//!
//! Stateless. All three props come from core state; the bar just renders
//! what it's given, so tests can construct it directly:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("alice", "Searching...");
//! title_bar.render(frame, area);
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_TITLE: &str = "E-commerce Chatbot";

pub struct TitleBar<'a> {
    pub username: &'a str,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(username: &'a str, status_message: &'a str) -> Self {
        Self {
            username,
            status_message,
        }
    }
}

impl<'a> Component for TitleBar<'a> {
    /// Single line: `E-commerce Chatbot | alice | <status>`. The status
    /// segment is omitted when empty.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                APP_TITLE,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(self.username, Style::default().fg(Color::Cyan)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message,
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
