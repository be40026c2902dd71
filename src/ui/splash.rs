//! Splash screen rendering with ASCII art logo

use crate::state::SplashState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LOGO: [&str; 4] = [
    r"  ___ ___  ___  ___    ___ ___  __  __ ___  _   ___ ___ ",
    r" / __| _ \/ _ \| _ \  / __/ _ \|  \/  | _ \/_\ / __/ __|",
    r"| (__|   / (_) |  _/ | (__ (_) | |\/| |  _/ _ \\__ \__ \",
    r" \___|_|_\\___/|_|    \___\___/|_|  |_|_|/_/ \_\___/___/",
];

const TAGLINE: &str = "Make your farm land ready to increase its productivity";

fn logo_lines() -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Green);
    let mut lines: Vec<Line> = LOGO
        .iter()
        .map(|row| Line::from(Span::styled(*row, style)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{TAGLINE:^width$}", width = logo_width() as usize),
        Style::default().fg(Color::Yellow),
    )));
    lines
}

fn logo_width() -> u16 {
    LOGO.iter()
        .map(|row| row.chars().count())
        .chain(std::iter::once(TAGLINE.len()))
        .max()
        .unwrap_or(0) as u16
}

/// Draw the splash screen
pub fn draw(frame: &mut Frame, area: Rect, splash_state: &SplashState) {
    let lines = logo_lines();
    let logo_height = lines.len() as u16;
    let logo_width = logo_width();

    // The logo may scroll above the top edge
    let base_y = area.y as i32 + area.height.saturating_sub(logo_height) as i32 / 2;
    let y_pos = base_y - splash_state.scroll_offset as i32;
    let x = area.x + area.width.saturating_sub(logo_width) / 2;

    let lines_off_top = if y_pos < area.y as i32 {
        (area.y as i32 - y_pos) as usize
    } else {
        0
    };
    if lines_off_top >= lines.len() {
        return;
    }

    let visible: Vec<Line> = lines.into_iter().skip(lines_off_top).collect();
    let visible_height = visible.len() as u16;
    let render_y = (y_pos.max(area.y as i32)) as u16;

    let logo_area = Rect {
        x,
        y: render_y,
        width: logo_width.min(area.width),
        height: visible_height.min(area.height),
    };
    frame.render_widget(Paragraph::new(visible), logo_area);

    if splash_state.scroll_offset < 1.0 && area.height > 2 {
        let hint = "Press any key to skip";
        let hint_area = Rect {
            x: area.x + area.width.saturating_sub(hint.len() as u16) / 2,
            y: area.y + area.height - 2,
            width: (hint.len() as u16).min(area.width),
            height: 1,
        };
        let hint_line = Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(hint_line), hint_area);
    }
}
