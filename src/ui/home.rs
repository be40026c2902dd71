//! Landing page

use crate::app::App;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(5),             // Headline
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT), // Get started
            Constraint::Length(2),             // Secondary actions
            Constraint::Min(0),
        ])
        .split(area);

    let headline = vec![
        Line::from(vec![
            Span::raw("Your "),
            Span::styled(
                "FUTURE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" is coming!"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Make your farm land ready to increase its productivity!",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(headline)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    let width = 20u16.min(chunks[3].width);
    let button = Rect {
        x: chunks[3].x + chunks[3].width.saturating_sub(width) / 2,
        width,
        ..chunks[3]
    };
    let label = if app.state.signup.is_some() {
        "Continue signup"
    } else {
        "Get started"
    };
    render_button(frame, button, label, true, true, Some(Color::Green));

    let secondary = Paragraph::new(Line::from(vec![
        Span::styled("l", Style::default().fg(Color::Cyan)),
        Span::raw(" login   "),
        Span::styled("d", Style::default().fg(Color::Cyan)),
        Span::raw(" dashboard"),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(secondary, chunks[4]);
}
