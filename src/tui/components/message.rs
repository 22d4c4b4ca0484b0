use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::conversation::{ChatEntry, Sender};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Borders (top + bottom) plus the timestamp line.
const VERTICAL_OVERHEAD: u16 = 3;

/// A stateless component that renders one chat entry as a bubble.
///
/// User bubbles hug the right edge, bot bubbles the left edge, each at most
/// three quarters of the available width. The bubble shrinks to fit short
/// messages.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub entry: &'a ChatEntry,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a ChatEntry) -> Self {
        Self { entry }
    }

    fn max_bubble_width(available: u16) -> u16 {
        (available.saturating_mul(3) / 4).max(HORIZONTAL_OVERHEAD + 1).min(available)
    }

    /// Width of the bubble for `entry` inside a row `available` columns wide.
    pub fn bubble_width(entry: &ChatEntry, available: u16) -> u16 {
        let widest_line = entry
            .message
            .trim()
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0)
            .max(entry.timestamp.width())
            .max(label(entry.sender).width() + 2);
        let wanted = (widest_line as u16).saturating_add(HORIZONTAL_OVERHEAD);
        wanted.min(Self::max_bubble_width(available))
    }

    /// Predicts rendered height without rendering, using `textwrap` options
    /// that match Ratatui's `Paragraph` wrapping.
    pub fn calculate_height(entry: &ChatEntry, available: u16) -> u16 {
        let content_width = Self::bubble_width(entry, available).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(entry.message.trim(), options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    /// Where the bubble sits inside a full-width row.
    pub fn bubble_rect(entry: &ChatEntry, row: Rect) -> Rect {
        let width = Self::bubble_width(entry, row.width);
        let x = match entry.sender {
            Sender::User => row.x + row.width.saturating_sub(width),
            Sender::Bot => row.x,
        };
        Rect { x, width, ..row }
    }
}

fn label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you",
        Sender::Bot => "shopbot",
    }
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Bot => Style::default().fg(Color::Green),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bubble = Self::bubble_rect(self.entry, area);
        let style = sender_style(self.entry.sender);

        let block = Block::bordered()
            .title(label(self.entry.sender))
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);

        let text_height = inner.height.saturating_sub(1);
        let text_area = Rect {
            height: text_height,
            ..inner
        };
        Paragraph::new(self.entry.message.trim())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        let stamp_area = Rect {
            y: inner.y + text_height,
            height: inner.height.min(1),
            ..inner
        };
        Paragraph::new(Line::from(Span::styled(
            self.entry.timestamp.as_str(),
            Style::default().fg(Color::DarkGray),
        )))
        .render(stamp_area, buf);
    }
}
