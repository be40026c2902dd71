//! UI module for rendering the TUI

mod components;
mod dashboard;
mod forms;
mod home;
mod layout;
mod splash;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if let (View::Splash, Some(splash)) = (app.state.current_view, &app.splash_state) {
        splash::draw(frame, area, splash);
        return;
    }

    let screen = layout::create_layout(area);
    layout::draw_header(frame, screen.header, app);

    match app.state.current_view {
        View::Splash => {}
        View::Home => home::draw(frame, screen.content, app),
        View::Login => forms::draw_login(frame, screen.content, app),
        View::Signup => forms::draw_signup(frame, screen.content, app),
        View::Dashboard => dashboard::draw(frame, screen.content, app),
    }

    layout::draw_footer(frame, screen.footer);
    layout::draw_status_bar(frame, screen.status, app);

    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.error_count().saturating_sub(1));
    }
}
