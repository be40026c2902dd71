//! Layout components (header, footer, status bar)

use crate::app::App;
use crate::platform::{LOGIN_LINK_SHORTCUT, REVEAL_SHORTCUT};
use crate::state::View;
use chrono::{Datelike, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Regions of the main screen
pub struct ScreenLayout {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
    pub status: Rect,
}

/// Split the screen into header, content, footer and status bar
pub fn create_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        content: chunks[1],
        footer: chunks[2],
        status: chunks[3],
    }
}

/// App name on the left, current route on the right
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.state.current_view;
    let mut spans = vec![
        Span::styled(
            " 🌱 Crop Compass ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(view.title(), Style::default().fg(Color::White)),
    ];
    if let Some(profile) = &app.state.profile {
        spans.push(Span::styled(
            format!("  · {}", profile.username),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if let Some(path) = view.path() {
        let route = Paragraph::new(format!("{path} "))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(route, area);
    }
}

pub fn draw_footer(frame: &mut Frame, area: Rect) {
    let text = footer_text(Local::now().year());
    let footer = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn footer_text(year: i32) -> String {
    format!("{year} - HydroGrow")
}

/// Key hints, plus the toast message when one is showing
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {}", view_hints(app.state.current_view)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            msg.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit, quit_area);
}

/// Keyboard hints for the current view
fn view_hints(view: View) -> String {
    match view {
        View::Splash => "Press any key to skip".to_string(),
        View::Home => "Enter:get started  l:login  d:dashboard  q:quit".to_string(),
        View::Signup => format!(
            "Tab:next  ←/→:button  Enter:select  {REVEAL_SHORTCUT}:show/hide  {LOGIN_LINK_SHORTCUT}:login  Esc:back"
        ),
        View::Login => format!("Tab:next  Enter:select  {REVEAL_SHORTCUT}:show/hide  Esc:back"),
        View::Dashboard => "r:refresh  y:copy recommendation  s:sign up  Esc:back".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_text() {
        assert_eq!(footer_text(2024), "2024 - HydroGrow");
    }

    #[test]
    fn test_layout_reserves_three_rows() {
        let layout = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.content.height, 21);
        assert_eq!(layout.status.y, 23);
    }

    #[test]
    fn test_every_view_has_hints() {
        for view in [
            View::Splash,
            View::Home,
            View::Signup,
            View::Login,
            View::Dashboard,
        ] {
            assert!(!view_hints(view).is_empty());
        }
    }
}
