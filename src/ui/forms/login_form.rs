//! Login form rendering

use super::field_renderer::{draw_field, FieldView, FIELD_HEIGHT};
use crate::app::App;
use crate::state::LoginView;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Width of the centered login card
const CARD_WIDTH: u16 = 56;

pub fn draw_login(frame: &mut Frame, area: Rect, app: &App) {
    let login = &app.state.login;

    let card = Rect {
        x: area.x + area.width.saturating_sub(CARD_WIDTH) / 2,
        width: CARD_WIDTH.min(area.width),
        ..area
    };
    let block = Block::default()
        .title(" Login ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Email
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(BUTTON_HEIGHT), // Login
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    draw_field(
        frame,
        chunks[0],
        &login.email,
        FieldView {
            is_active: login.active_field_index == 0,
            is_invalid: login.is_email_invalid(),
            hint: Some("Email is required."),
            ..Default::default()
        },
    );
    draw_field(
        frame,
        chunks[1],
        &login.password,
        FieldView {
            is_active: login.active_field_index == 1,
            is_invalid: login.is_password_invalid(),
            reveal: login.show_password,
            hint: Some("Password is required."),
            ..Default::default()
        },
    );
    draw_login_button(frame, chunks[2], login);
}

fn draw_login_button(frame: &mut Frame, area: Rect, login: &LoginView) {
    let button = Rect {
        width: area.width.min(16),
        ..area
    };
    render_button(
        frame,
        button,
        "Login",
        login.is_button_active(),
        true,
        Some(Color::Green),
    );
}
