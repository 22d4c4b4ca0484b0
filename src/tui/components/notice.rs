//! # Notice Popup
//!
//! Blocking message box drawn over the current view (login rejections,
//! transport failures during login). While it is up the event loop routes
//! nothing else; Enter or Esc dismisses it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::tui::component::Component;

pub const DISMISS_HINT: &str = "Press Enter to dismiss";

const MAX_WIDTH: u16 = 50;
/// Borders, a blank spacer line and the hint line.
const CHROME_HEIGHT: u16 = 4;

pub struct Notice<'a> {
    pub text: &'a str,
}

impl<'a> Notice<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    fn popup_area(&self, area: Rect) -> Rect {
        let width = MAX_WIDTH.min(area.width);
        let text_width = width.saturating_sub(2).max(1) as usize;
        let text_lines = textwrap::wrap(self.text, text_width).len().max(1) as u16;
        let height = (text_lines + CHROME_HEIGHT).min(area.height);

        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);
        popup
    }
}

impl<'a> Component for Notice<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = self.popup_area(area);

        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Notice ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let lines = vec![
            Line::from(self.text),
            Line::from(""),
            Line::from(DISMISS_HINT).style(Style::default().fg(Color::DarkGray)),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            popup,
        );
    }
}
