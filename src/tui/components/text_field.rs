//! # TextField Component
//!
//! Single-line text input used by the login form and the query box.
//!
//! ## Responsibilities
//!
//! - Capture and edit text (insert, backspace, delete, cursor movement, paste)
//! - Enforce a character limit
//! - Optionally mask its contents (passwords)
//! - Scroll horizontally so the cursor stays visible
//!
//! The field never clears itself on Enter: the owner decides whether the
//! submission was accepted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    Submit,
}

#[derive(Debug, Clone)]
pub struct TextField {
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    max_chars: Option<usize>,
    masked: bool,
    placeholder: &'static str,
}

impl TextField {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            max_chars: None,
            masked: false,
            placeholder: "",
        }
    }

    pub fn max_chars(mut self, limit: usize) -> Self {
        self.max_chars = Some(limit);
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = text;
        self
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn remaining(&self) -> usize {
        self.max_chars
            .map(|max| max.saturating_sub(self.buffer.chars().count()))
            .unwrap_or(usize::MAX)
    }

    fn insert_str(&mut self, text: &str) {
        // Single line: pasted newlines become spaces
        let cleaned: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .take(self.remaining())
            .collect();
        self.buffer.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .chars()
            .next_back()
            .map(|c| self.cursor - c.len_utf8())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn display_char(&self, c: char) -> char {
        if self.masked { '*' } else { c }
    }

    /// Visible slice of the (possibly masked) text for a field `width`
    /// columns wide, plus the cursor column within it.
    pub fn visible(&self, width: u16) -> (String, u16) {
        let width = width as usize;
        let before: Vec<char> = self.buffer[..self.cursor]
            .chars()
            .map(|c| self.display_char(c))
            .collect();
        let after = self.buffer[self.cursor..].chars().map(|c| self.display_char(c));

        // Drop leading chars until the cursor fits (one column reserved for it)
        let mut start = 0;
        let mut cursor_col: usize = before.iter().map(|c| c.width().unwrap_or(0)).sum();
        while cursor_col >= width && start < before.len() {
            cursor_col -= before[start].width().unwrap_or(0);
            start += 1;
        }

        let mut shown = String::new();
        let mut used = 0;
        for c in before[start..].iter().copied().chain(after) {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            shown.push(c);
            used += w;
        }
        (shown, cursor_col as u16)
    }

    /// Renders the field inside a rounded block. Only the focused field
    /// places the terminal cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title.to_string());
        let inner = block.inner(area);

        let paragraph = if self.buffer.is_empty() && !self.placeholder.is_empty() {
            Paragraph::new(self.placeholder).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let (shown, _) = self.visible(inner.width);
            Paragraph::new(shown).style(Style::default().fg(Color::White))
        };

        frame.render_widget(paragraph.block(block), area);

        if focused && inner.width > 0 && inner.height > 0 {
            let (_, cursor_col) = self.visible(inner.width);
            frame.set_cursor_position((inner.x + cursor_col.min(inner.width - 1), inner.y));
        }
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    /// Edits are applied in place; only Enter is reported to the owner.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf));
            }
            TuiEvent::Paste(text) => self.insert_str(text),
            TuiEvent::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                }
            }
            TuiEvent::Delete => {
                if let Some(next) = self.next_boundary() {
                    self.buffer.drain(self.cursor..next);
                }
            }
            TuiEvent::CursorLeft => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            TuiEvent::CursorRight => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
            }
            TuiEvent::CursorHome => self.cursor = 0,
            TuiEvent::CursorEnd => self.cursor = self.buffer.len(),
            TuiEvent::Submit => return Some(FieldEvent::Submit),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(field: &mut TextField, text: &str) {
        for c in text.chars() {
            field.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new();
        type_text(&mut field, "abc");
        assert_eq!(field.text(), "abc");

        assert_eq!(field.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn test_backspace_on_empty_is_none() {
        let mut field = TextField::new();
        assert_eq!(field.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_cursor_movement_and_insert_in_middle() {
        let mut field = TextField::new();
        type_text(&mut field, "ac");
        field.handle_event(&TuiEvent::CursorLeft);
        type_text(&mut field, "b");
        assert_eq!(field.text(), "abc");

        field.handle_event(&TuiEvent::CursorHome);
        field.handle_event(&TuiEvent::Delete);
        assert_eq!(field.text(), "bc");

        field.handle_event(&TuiEvent::CursorEnd);
        type_text(&mut field, "d");
        assert_eq!(field.text(), "bcd");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = TextField::new();
        type_text(&mut field, "café");
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.text(), "caf");
    }

    #[test]
    fn test_max_chars_is_enforced() {
        let mut field = TextField::new().max_chars(3);
        type_text(&mut field, "abcdef");
        assert_eq!(field.text(), "abc");
        assert_eq!(field.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_paste_flattens_newlines_and_respects_limit() {
        let mut field = TextField::new().max_chars(8);
        field.handle_event(&TuiEvent::Paste("red\nshoes size 9".to_string()));
        assert_eq!(field.text(), "red shoe");
    }

    #[test]
    fn test_only_enter_is_reported() {
        let mut field = TextField::new();
        for event in [
            TuiEvent::InputChar('a'),
            TuiEvent::Paste("bc".to_string()),
            TuiEvent::CursorLeft,
            TuiEvent::CursorRight,
            TuiEvent::CursorHome,
            TuiEvent::CursorEnd,
            TuiEvent::Delete,
            TuiEvent::Backspace,
        ] {
            assert_eq!(field.handle_event(&event), None);
        }
        assert_eq!(field.text(), "ab");
        assert_eq!(field.handle_event(&TuiEvent::Submit), Some(FieldEvent::Submit));
    }

    #[test]
    fn test_submit_does_not_clear() {
        let mut field = TextField::new();
        type_text(&mut field, "laptops");
        assert_eq!(field.handle_event(&TuiEvent::Submit), Some(FieldEvent::Submit));
        assert_eq!(field.text(), "laptops");
        field.clear();
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_masked_field_hides_text() {
        let mut field = TextField::new().masked();
        type_text(&mut field, "secret");
        let (shown, col) = field.visible(20);
        assert_eq!(shown, "******");
        assert_eq!(col, 6);
        assert_eq!(field.text(), "secret");
    }

    #[test]
    fn test_visible_scrolls_to_keep_cursor_in_view() {
        let mut field = TextField::new();
        type_text(&mut field, "abcdefghij");
        let (shown, col) = field.visible(5);
        assert_eq!(shown, "ghij");
        assert_eq!(col, 4);
        assert!(col < 5);
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let field = TextField::new().placeholder("Type here");

        terminal
            .draw(|f| field.render(f, f.area(), "Query", true))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Type here"));
        assert!(text.contains("Query"));
    }
}
