use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::{ScrollTarget, TuiState};
use crate::tui::component::Component;
use crate::tui::components::{LoginScreen, MessageList, Notice, ProductGrid, TitleBar};

pub const CHAT_HELP: &str =
    "Enter: send · Ctrl+R: reset · Ctrl+L: logout · PgUp/PgDn: scroll · Tab: chat/products · Ctrl+C: quit";

const QUERY_INPUT_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let area = frame.area();

    match app.username() {
        Some(username) => draw_chat_view(frame, area, app, username, tui),
        None => LoginScreen::new(&tui.login_form, app.is_loading).render(frame, area),
    }

    if let Some(text) = &app.notice {
        Notice::new(text).render(frame, area);
    }
}

fn draw_chat_view(frame: &mut Frame, area: Rect, app: &App, username: &str, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    // Products never take more than half the screen; the rest scrolls
    let products_height = ProductGrid::required_height(app.products.len(), area.width).min(area.height / 2);

    let [title_area, conversation_area, products_area, input_area, help_area] = Layout::vertical([
        Length(1),
        Min(0),
        Length(products_height),
        Length(QUERY_INPUT_HEIGHT),
        Length(1),
    ])
    .areas(area);

    TitleBar::new(username, &app.status_message).render(frame, title_area);

    MessageList::new(&mut tui.message_list, &app.conversation, app.is_loading)
        .render(frame, conversation_area);

    if products_height > 0 {
        let focused = tui.scroll_target == ScrollTarget::Products;
        ProductGrid::new(&mut tui.product_grid, &app.products, focused)
            .render(frame, products_area);
    }

    let input_title = if app.is_searching() { "Query (searching...)" } else { "Query" };
    tui.query_input
        .render(frame, input_area, input_title, app.notice.is_none());

    frame.render_widget(
        Paragraph::new(CHAT_HELP).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
