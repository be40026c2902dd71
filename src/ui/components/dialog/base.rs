//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    pub accent: Color,
    /// Message content, may contain `\n`
    pub message: &'a str,
    /// Footer line, e.g. how to dismiss
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

/// Horizontal padding inside the borders
const PADDING: u16 = 4;

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let wrap_width = config.max_width.saturating_sub(PADDING + 2).max(10) as usize;
    let lines = wrap_text(config.message, wrap_width);
    let area = dialog_area(frame.area(), &config, &lines);

    frame.render_widget(Clear, area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(lines.into_iter().map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.accent));
    let dialog = Paragraph::new(content)
        .block(block)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, area);
}

/// Centered rectangle sized to the wrapped message
fn dialog_area(screen: Rect, config: &DialogConfig, lines: &[String]) -> Rect {
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(config.title.chars().count()))
        .max()
        .unwrap_or(0) as u16;
    let width = (content_width + PADDING + 2)
        .min(config.max_width)
        .min(screen.width);

    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    let height = (2 + lines.len() as u16 + hint_rows + 2)
        .max(5)
        .min(screen.height);

    Rect {
        x: screen.x + screen.width.saturating_sub(width) / 2,
        y: screen.y + screen.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Greedy word wrap; blank lines in the input are kept
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if needed > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}
