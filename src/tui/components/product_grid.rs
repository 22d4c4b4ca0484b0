//! # ProductGrid Component
//!
//! Cards for the products returned by the latest successful search, laid
//! out in up to three columns depending on terminal width. The cards sit on
//! a `ScrollView` canvas, so a panel shorter than the full grid still
//! reaches every product.
//!
//! Same split as `MessageList`: `ProductGrid` is created each frame over
//! `&'a mut ProductGridState`, which lives in `TuiState` and owns the scroll
//! offset.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Product;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders plus name, description and price lines.
pub const CARD_HEIGHT: u16 = 5;
const MIN_CARD_WIDTH: u16 = 28;
const MAX_COLUMNS: u16 = 3;
/// Border of the surrounding panel.
const PANEL_OVERHEAD: u16 = 2;

/// Scroll state for the product panel.
/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct ProductGridState {
    pub scroll_state: ScrollViewState,
    pub viewport_height: u16,
    pub total_height: u16,
}

impl ProductGridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the first row, e.g. when a new result set is on its way.
    pub fn scroll_to_top(&mut self) {
        self.scroll_state.scroll_to_top();
    }

    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for ProductGridState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct ProductGrid<'a> {
    pub state: &'a mut ProductGridState,
    pub products: &'a [Product],
    /// Scroll keys currently go to this panel.
    pub focused: bool,
}

impl<'a> ProductGrid<'a> {
    pub fn new(state: &'a mut ProductGridState, products: &'a [Product], focused: bool) -> Self {
        Self {
            state,
            products,
            focused,
        }
    }

    /// Number of card columns that fit in a panel `width` columns wide.
    pub fn columns(width: u16) -> u16 {
        (width.saturating_sub(PANEL_OVERHEAD) / MIN_CARD_WIDTH).clamp(1, MAX_COLUMNS)
    }

    /// Panel height needed to show every card without scrolling, or 0 when
    /// there is nothing to show.
    pub fn required_height(count: usize, width: u16) -> u16 {
        if count == 0 {
            return 0;
        }
        Self::canvas_height(count, width).saturating_add(PANEL_OVERHEAD)
    }

    fn canvas_height(count: usize, width: u16) -> u16 {
        let columns = Self::columns(width) as usize;
        let rows = count.div_ceil(columns) as u16;
        rows.saturating_mul(CARD_HEIGHT)
    }

    fn card(product: &Product) -> Paragraph<'_> {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue));
        let lines = vec![
            Line::from(Span::styled(
                product.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                product.description.as_str(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                product.price_label(),
                Style::default().fg(Color::Green),
            )),
        ];
        Paragraph::new(lines).block(block)
    }
}

impl<'a> Component for ProductGrid<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.products.is_empty() || area.height <= PANEL_OVERHEAD {
            return;
        }

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" Products ({}) ", self.products.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
        let columns = Self::columns(area.width);
        let card_width = content_width / columns;
        let total_height = Self::canvas_height(self.products.len(), area.width);

        self.state.viewport_height = inner.height;
        self.state.total_height = total_height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (row, chunk) in self.products.chunks(columns as usize).enumerate() {
            let y = (row as u16).saturating_mul(CARD_HEIGHT);
            for (col, product) in chunk.iter().enumerate() {
                let x = col as u16 * card_width;
                let card_area = Rect::new(x, y, card_width, CARD_HEIGHT);
                scroll_view.render_widget(Self::card(product), card_area);
            }
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
