//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button. `accent` colors the label of an enabled,
/// unselected button.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Option<Color>,
) {
    let (border_style, text_style) = button_styles(is_selected, is_enabled, accent);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let paragraph = Paragraph::new(format!(" {label} "))
        .alignment(Alignment::Center)
        .style(text_style)
        .block(block);

    frame.render_widget(paragraph, area);
}

fn button_styles(is_selected: bool, is_enabled: bool, accent: Option<Color>) -> (Style, Style) {
    if !is_enabled {
        let dim = Style::default().fg(Color::DarkGray);
        return (dim, dim.add_modifier(Modifier::DIM));
    }
    if is_selected {
        let focus = Style::default().fg(Color::Cyan);
        return (focus, focus.add_modifier(Modifier::BOLD));
    }
    let text = accent.map_or_else(Style::default, |c| Style::default().fg(c));
    (Style::default().fg(Color::Gray), text)
}
