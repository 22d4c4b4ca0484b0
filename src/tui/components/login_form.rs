//! # Login Form
//!
//! Username + masked password, centred on screen. Tab moves focus, Enter
//! on the username field jumps to the password, Enter on the password
//! field submits. Nothing is validated client-side; the backend decides.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

pub const PASSWORD_MAX_CHARS: usize = 10_000;

const FORM_WIDTH: u16 = 44;
const FORM_HEIGHT: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    Submit { username: String, password: String },
}

/// Persistent login form state (lives in `TuiState`).
pub struct LoginForm {
    pub username: TextField,
    pub password: TextField,
    pub focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: TextField::new().placeholder("Username"),
            password: TextField::new()
                .masked()
                .max_chars(PASSWORD_MAX_CHARS)
                .placeholder("Password"),
            focus: LoginField::Username,
        }
    }

    fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

impl EventHandler for LoginForm {
    type Event = LoginEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if matches!(event, TuiEvent::FocusNext) {
            self.focus = match self.focus {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
            return None;
        }

        match (self.focus, self.focused_mut().handle_event(event)) {
            (LoginField::Username, Some(FieldEvent::Submit)) => {
                self.focus = LoginField::Password;
                None
            }
            (LoginField::Password, Some(FieldEvent::Submit)) => Some(LoginEvent::Submit {
                username: self.username.text().to_string(),
                password: self.password.text().to_string(),
            }),
            _ => None,
        }
    }
}

/// Transient view over the form, created each frame.
pub struct LoginScreen<'a> {
    pub form: &'a LoginForm,
    pub is_loading: bool,
}

impl<'a> LoginScreen<'a> {
    pub fn new(form: &'a LoginForm, is_loading: bool) -> Self {
        Self { form, is_loading }
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_loading { "Logging in..." } else { "Login" }
    }
}

impl<'a> Component for LoginScreen<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [column] = Layout::horizontal([Constraint::Length(FORM_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [form_area] = Layout::vertical([Constraint::Length(FORM_HEIGHT)])
            .flex(Flex::Center)
            .areas(column);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Login ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let [_, username_area, password_area, _, button_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let focus = self.form.focus;
        self.form
            .username
            .render(frame, username_area, "Username", focus == LoginField::Username);
        self.form
            .password
            .render(frame, password_area, "Password", focus == LoginField::Password);

        let button_style = if self.is_loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(format!(" {} ", self.button_label()))
                .style(button_style)
                .alignment(Alignment::Center),
            button_area,
        );

        frame.render_widget(
            Paragraph::new("Tab: switch field · Enter: next/submit · Esc: quit")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            hint_area,
        );
    }
}
