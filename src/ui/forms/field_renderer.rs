//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by a field: bordered input plus one line of help
pub const FIELD_HEIGHT: u16 = 4;

/// How a field should look this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldView<'a> {
    pub is_active: bool,
    pub is_invalid: bool,
    /// Show secret values in clear text
    pub reveal: bool,
    /// Text under the input; `hint` replaces it when invalid
    pub help: Option<&'a str>,
    pub hint: Option<&'a str>,
}

fn border_color(view: &FieldView) -> Color {
    match (view.is_invalid, view.is_active) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::DarkGray,
    }
}

/// Draw a bordered input with label, placeholder, cursor and help line
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, view: FieldView) {
    let border = Style::default().fg(border_color(&view));

    let value = field.display_value(view.reveal);
    let mut spans = if value.is_empty() {
        let placeholder = field.placeholder.as_deref().unwrap_or_default();
        vec![Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        vec![Span::styled(value, Style::default().fg(Color::White))]
    };
    if view.is_active {
        let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));
        if field.is_empty() {
            spans.insert(0, cursor);
        } else {
            spans.push(cursor);
        }
    }

    let input_area = Rect {
        height: area.height.min(3),
        ..area
    };
    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);

    let below = if view.is_invalid { view.hint } else { view.help };
    if let (Some(text), true) = (below, area.height > 3) {
        let color = if view.is_invalid {
            Color::Red
        } else {
            Color::DarkGray
        };
        let help_area = Rect {
            x: area.x + 1,
            y: area.y + 3,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        draw_help_text(frame, help_area, text, color);
    }
}

pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    frame.render_widget(
        Paragraph::new(Span::styled(text.to_string(), Style::default().fg(color))),
        area,
    );
}
