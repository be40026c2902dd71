//! Dashboard: weather, rainfall and soil charts plus the crop recommendation

use crate::app::App;
use crate::state::{y_bounds, DashboardState, PanelState, Series};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const SERIES_COLORS: [Color; 3] = [Color::Yellow, Color::Cyan, Color::Red];

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.state.dashboard;

    if dashboard.location.is_none() {
        draw_not_signed_up(frame, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[1]);

    let spinner = spinner_frame(dashboard.spinner_tick);

    draw_series_panel(
        frame,
        top[0],
        "Temperature (°C)",
        &dashboard.temperature(),
        dashboard.weather.is_loading().then_some(spinner),
    );
    draw_series_panel(
        frame,
        top[1],
        "Humidity (%)",
        &dashboard.humidity(),
        dashboard.weather.is_loading().then_some(spinner),
    );

    let rainfall_title = if matches!(dashboard.rainfall, PanelState::Failed) {
        "Rainfall (mm, sample)"
    } else {
        "Rainfall (mm)"
    };
    draw_series_panel(
        frame,
        bottom[0],
        rainfall_title,
        &dashboard.rainfall(),
        dashboard.rainfall.is_loading().then_some(spinner),
    );
    draw_soil_panel(frame, bottom[1], dashboard, spinner);
    draw_prediction_panel(frame, bottom[2], dashboard, spinner);
}

fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
}

fn draw_loading(frame: &mut Frame, area: Rect, spinner: &str) {
    let text = Paragraph::new(format!("{spinner} Loading..."))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(text, area);
}

fn draw_not_signed_up(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let message = Paragraph::new(Line::from(vec![
        Span::raw("You're not signed up. Press "),
        Span::styled(
            "s",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to sign up."),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(message, chunks[1]);
}

/// Line chart over category x labels
fn draw_series_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[Series],
    loading: Option<&str>,
) {
    let block = panel_block(title);
    let inner = block.inner(area);

    if let Some(spinner) = loading {
        frame.render_widget(block, area);
        draw_loading(frame, inner, spinner);
        return;
    }

    let points: Vec<Vec<(f64, f64)>> = series.iter().map(Series::indexed).collect();
    let longest = series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    if longest == 0 {
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("No data found")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (s, data))| {
            Dataset::default()
                .name(s.id)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(data)
        })
        .collect();

    let x_labels = category_labels(series);
    let [y_min, y_max] = y_bounds(series);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, (longest.saturating_sub(1)).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels([format!("{y_min:.0}"), format!("{y_max:.0}")]),
        );
    frame.render_widget(chart, area);
}

/// First, middle and last x labels of the longest series
fn category_labels(series: &[Series]) -> Vec<String> {
    let Some(longest) = series.iter().max_by_key(|s| s.points.len()) else {
        return Vec::new();
    };
    let points = &longest.points;
    match points.len() {
        0 => Vec::new(),
        1 => vec![points[0].0.clone()],
        2 => vec![points[0].0.clone(), points[1].0.clone()],
        n => vec![
            points[0].0.clone(),
            points[n / 2].0.clone(),
            points[n - 1].0.clone(),
        ],
    }
}

fn draw_soil_panel(frame: &mut Frame, area: Rect, dashboard: &DashboardState, spinner: &str) {
    let block = panel_block("Soil properties");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if dashboard.soil.is_loading() {
        draw_loading(frame, inner, spinner);
        return;
    }

    let Some(readings) = dashboard.soil_readings() else {
        frame.render_widget(
            Paragraph::new("No data found")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let lines: Vec<Line> = readings
        .iter()
        .map(|reading| {
            let value = match &reading.unit {
                Some(unit) => format!("{} {unit}", reading.value),
                None => format!("{}", reading.value),
            };
            Line::from(vec![
                Span::styled(
                    format!("{}: ", reading.name),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn draw_prediction_panel(
    frame: &mut Frame,
    area: Rect,
    dashboard: &DashboardState,
    spinner: &str,
) {
    let block = panel_block("Predictions");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if dashboard.prediction.is_loading() {
        draw_loading(frame, inner, spinner);
        return;
    }

    let Some(prediction) = dashboard.prediction.loaded() else {
        frame.render_widget(
            Paragraph::new("No data found")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Recommended: "),
            Span::styled(
                prediction.prediction.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    lines.extend(
        prediction
            .description
            .lines()
            .map(|l| Line::from(l.trim_start_matches('#').trim().to_string())),
    );
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
