//! Signup wizard rendering: stepper, active step fields and navigation

use super::field_renderer::{draw_field, draw_help_text, FieldView, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::LOGIN_LINK_SHORTCUT;
use crate::state::{SignupFlow, StepStatus, WizardButton};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the signup screen
pub fn draw_signup(frame: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = app.state.signup.as_ref() else {
        return;
    };

    let block = Block::default()
        .title(" Create your account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(34), // Stepper
            Constraint::Min(30),    // Step form
        ])
        .margin(1)
        .split(inner);

    draw_stepper(frame, columns[0], flow);
    draw_step_form(frame, columns[1], flow);
}

fn status_marker(status: StepStatus, index: usize) -> (String, Style) {
    match status {
        StepStatus::Complete => ("✔".to_string(), Style::default().fg(Color::Green)),
        StepStatus::Active => (
            format!("{}", index + 1),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        StepStatus::Incomplete => (
            format!("{}", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
    }
}

/// Vertical list of steps with complete/active/pending markers
fn draw_stepper(frame: &mut Frame, area: Rect, flow: &SignupFlow) {
    let wizard = flow.wizard();
    let mut lines = Vec::new();
    for (index, step) in wizard.steps().iter().enumerate() {
        let status = wizard.step_status(index);
        let (marker, style) = status_marker(status, index);
        let title_style = if status == StepStatus::Incomplete {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(step.title, title_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", step.description),
            Style::default().fg(Color::DarkGray),
        )));
        if index + 1 < wizard.step_count() {
            lines.push(Line::from(Span::styled(
                " │",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Fields of the active step followed by the navigation buttons
fn draw_step_form(frame: &mut Frame, area: Rect, flow: &SignupFlow) {
    let fields = flow.current_fields();
    let errors = flow.errors();

    let mut constraints = vec![Constraint::Length(2)]; // Step heading
    constraints.extend(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(1)); // Login link
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let step = flow.wizard().active_step();
    let heading = Line::from(Span::styled(
        step.title,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    let active = flow.active_input();
    for (slot, field) in fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[slot + 1],
            flow.field(*field),
            FieldView {
                is_active: active == Some(*field),
                is_invalid: errors.is_invalid(*field),
                reveal: flow.is_revealed(*field),
                help: Some(field.help()),
                hint: Some(field.hint()),
            },
        );
    }

    let buttons_area = chunks[fields.len() + 1];
    draw_buttons(frame, buttons_area, flow);

    let link = format!("Already have an account? {LOGIN_LINK_SHORTCUT} to log in");
    draw_help_text(frame, chunks[fields.len() + 2], &link, Color::Blue);
}

fn draw_buttons(frame: &mut Frame, area: Rect, flow: &SignupFlow) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Length(2),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(area);

    let focused = flow.is_buttons_row_active();
    render_button(
        frame,
        halves[0],
        "Previous",
        focused && flow.selected_button == WizardButton::Previous,
        flow.can_go_back(),
        None,
    );

    let primary = if flow.wizard().is_last_step() {
        "Done"
    } else {
        "Next"
    };
    render_button(
        frame,
        halves[2],
        primary,
        focused && flow.selected_button == WizardButton::Next,
        flow.primary_enabled(),
        Some(Color::Green),
    );
}
