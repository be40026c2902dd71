//! Application state definitions

use super::dashboard::DashboardState;
use super::forms::{generate_password, LoginView, SignupFlow, SUGGESTED_PASSWORD_LEN};
use crate::storage::FarmProfile;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Splash screen with logo animation
    Splash,
    #[default]
    Home,
    Login,
    Signup,
    Dashboard,
}

impl View {
    /// Routable views and their paths
    pub const ROUTES: [(&'static str, View); 4] = [
        ("/", View::Home),
        ("/auth/login", View::Login),
        ("/auth/signup", View::Signup),
        ("/dashboard", View::Dashboard),
    ];

    /// Resolve a route path. Unknown paths fall back to Home.
    pub fn from_path(path: &str) -> View {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Self::ROUTES
            .iter()
            .find(|(route, _)| *route == trimmed)
            .map(|(_, view)| *view)
            .unwrap_or_else(|| {
                tracing::warn!(path, "unknown route, falling back to home");
                View::Home
            })
    }

    pub fn path(&self) -> Option<&'static str> {
        Self::ROUTES
            .iter()
            .find(|(_, view)| view == self)
            .map(|(route, _)| *route)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Splash => "",
            View::Home => "Home",
            View::Login => "Login",
            View::Signup => "Sign up",
            View::Dashboard => "Dashboard",
        }
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Screens
    /// Present while the signup wizard is open; dropped on completion
    pub signup: Option<SignupFlow>,
    pub login: LoginView,
    pub dashboard: DashboardState,

    /// Saved farm profile, if the user has signed up
    pub profile: Option<FarmProfile>,

    // Feedback
    errors: VecDeque<String>,
    /// Short-lived toast shown in the status bar
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current_view: View::default(),
            view_history: Vec::new(),
            signup: None,
            login: LoginView::new(generate_password(SUGGESTED_PASSWORD_LEN)),
            dashboard: DashboardState::default(),
            profile: None,
            errors: VecDeque::new(),
            status_message: None,
        }
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!(%message, "error shown to user");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
