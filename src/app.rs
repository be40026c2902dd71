//! Application state and core logic

use crate::api::models::{Prediction, RainfallRecord, SoilProperties, WeatherReport};
use crate::api::{FarmApi, FarmApiClient, GeolocationProvider, IpGeolocation};
use crate::config::TuiConfig;
use crate::platform::SHORTCUT_MODIFIER;
use crate::state::{
    complete_signup, generate_password, AppState, Form, SignupFlow, SplashState, View,
    WizardButton, SUGGESTED_PASSWORD_LEN,
};
use crate::storage::{FarmLocation, FileProfileStore, ProfileStore};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Results of background work, applied on the UI loop
#[derive(Debug)]
pub enum AppEvent {
    Geolocated(FarmLocation),
    /// Dashboard results, tagged with the fetch generation that produced them
    WeatherLoaded(u64, Option<WeatherReport>),
    RainfallLoaded(u64, Option<Vec<RainfallRecord>>),
    SoilLoaded(u64, Option<SoilProperties>),
    PredictionLoaded(u64, Option<Prediction>),
}

impl AppEvent {
    fn fetch_generation(&self) -> Option<u64> {
        match self {
            AppEvent::Geolocated(_) => None,
            AppEvent::WeatherLoaded(generation, _)
            | AppEvent::RainfallLoaded(generation, _)
            | AppEvent::SoilLoaded(generation, _)
            | AppEvent::PredictionLoaded(generation, _) => Some(*generation),
        }
    }
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    api: Arc<dyn FarmApi>,
    geolocation: Arc<dyn GeolocationProvider>,
    profiles: Box<dyn ProfileStore>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
    /// Splash screen animation state
    pub splash_state: Option<SplashState>,
    /// View opened once the splash finishes
    start_view: View,
}

impl App {
    /// Create a new App wired to the real services
    pub fn new(config: TuiConfig) -> Result<Self> {
        let timeout = config.request_timeout();
        let api = FarmApiClient::new(config.api_base_url(), timeout)?;
        let geolocation = IpGeolocation::new(config.geolocation_url(), timeout)?;
        tracing::info!(api = config.api_base_url(), "starting crop compass");
        Ok(Self::with_services(
            config,
            Arc::new(api),
            Arc::new(geolocation),
            Box::new(FileProfileStore::new()),
        ))
    }

    /// Create an App over explicit service implementations
    pub fn with_services(
        config: TuiConfig,
        api: Arc<dyn FarmApi>,
        geolocation: Arc<dyn GeolocationProvider>,
        profiles: Box<dyn ProfileStore>,
    ) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let mut state = AppState::new();
        state.profile = match profiles.load() {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!("Failed to load saved profile: {err:#}");
                None
            }
        };

        let start_view = config
            .start_route
            .as_deref()
            .map(View::from_path)
            .unwrap_or_default();
        let skip_splash = config.skip_splash();

        let mut app = Self {
            state,
            api,
            geolocation,
            profiles,
            events_tx,
            events_rx,
            quit: false,
            splash_state: None,
            start_view,
        };

        if skip_splash {
            app.enter_view(start_view);
        } else {
            app.state.current_view = View::Splash;
            app.splash_state = Some(SplashState::new());
        }
        app
    }

    /// Update splash animation state.
    /// Returns true if animation is complete and we transitioned.
    pub fn update_splash(&mut self, terminal_height: u16) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update(terminal_height);
            if splash.is_complete() {
                self.splash_state = None;
                self.enter_view(self.start_view);
                return true;
            }
        }
        false
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Per-frame housekeeping: apply finished background work and spin spinners
    pub fn tick(&mut self) {
        self.drain_events();
        self.state.dashboard.tick();
    }

    /// Apply every pending background result
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        if let Some(generation) = event.fetch_generation() {
            if !self.state.dashboard.is_current(generation) {
                tracing::debug!(generation, "dropping stale dashboard result");
                return;
            }
        }
        match event {
            AppEvent::Geolocated(location) => {
                if let Some(flow) = self.state.signup.as_mut() {
                    if flow.apply_geolocation(location.latitude, location.longitude) {
                        tracing::debug!(?location, "pre-filled farm location");
                    }
                }
            }
            AppEvent::WeatherLoaded(_, result) => self.state.dashboard.weather.resolve(result),
            AppEvent::RainfallLoaded(_, result) => {
                self.state.dashboard.rainfall.resolve(result)
            }
            AppEvent::SoilLoaded(_, result) => self.state.dashboard.soil.resolve(result),
            AppEvent::PredictionLoaded(_, result) => {
                self.state.dashboard.prediction.resolve(result)
            }
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Toasts last until the next key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Splash => self.handle_splash_key(key),
            View::Home => self.handle_home_key(key),
            View::Login => self.handle_login_key(key),
            View::Signup => self.handle_signup_key(key),
            View::Dashboard => self.handle_dashboard_key(key)?,
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if view == self.state.current_view {
            return;
        }
        self.state.view_history.push(self.state.current_view);
        self.enter_view(view);
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        match self.state.view_history.pop() {
            Some(view) => self.state.current_view = view,
            None => self.state.current_view = View::Home,
        }
        if self.state.current_view == View::Signup && self.state.signup.is_none() {
            self.enter_view(View::Signup);
        }
    }

    /// Switch to `view` and start whatever it loads on open
    fn enter_view(&mut self, view: View) {
        self.state.current_view = view;
        match view {
            View::Signup => self.open_signup(),
            View::Dashboard => self.refresh_dashboard(),
            View::Splash | View::Home | View::Login => {}
        }
    }

    fn open_signup(&mut self) {
        if self.state.signup.is_none() {
            let placeholder = generate_password(SUGGESTED_PASSWORD_LEN);
            match SignupFlow::new(&placeholder) {
                Ok(flow) => self.state.signup = Some(flow),
                Err(err) => {
                    self.push_error(format!("Cannot open signup: {err}"));
                    self.state.current_view = View::Home;
                    return;
                }
            }
        }
        if let Some(flow) = self.state.signup.as_mut() {
            if !flow.geolocation_requested {
                flow.geolocation_requested = true;
                self.spawn_geolocation();
            }
        }
    }

    fn spawn_geolocation(&self) {
        let provider = Arc::clone(&self.geolocation);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match provider.locate().await {
                Ok(location) => {
                    let _ = tx.send(AppEvent::Geolocated(location));
                }
                Err(err) => tracing::info!("Geolocation unavailable: {err:#}"),
            }
        });
    }

    /// Start all four dashboard fetches in parallel
    pub fn refresh_dashboard(&mut self) {
        let Some(location) = self.state.profile.as_ref().map(|p| p.location) else {
            self.state.dashboard.clear();
            return;
        };
        let generation = self.state.dashboard.begin_fetch(location);

        macro_rules! fetch {
            ($method:ident, $event:ident) => {{
                let api = Arc::clone(&self.api);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = match api.$method(location).await {
                        Ok(data) => Some(data),
                        Err(err) => {
                            tracing::error!(
                                "Failed to fetch {}: {err:#}",
                                stringify!($method)
                            );
                            None
                        }
                    };
                    let _ = tx.send(AppEvent::$event(generation, result));
                });
            }};
        }

        fetch!(weather, WeatherLoaded);
        fetch!(rainfall, RainfallLoaded);
        fetch!(soil, SoilLoaded);
        fetch!(prediction, PredictionLoaded);
    }

    fn handle_splash_key(&mut self, _key: KeyEvent) {
        if let Some(ref mut splash) = self.splash_state {
            splash.skip();
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('g') | KeyCode::Char('s') => {
                self.navigate(View::Signup)
            }
            KeyCode::Char('l') => self.navigate(View::Login),
            KeyCode::Char('d') => self.navigate(View::Dashboard),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        let login = &mut self.state.login;
        if key.modifiers.contains(SHORTCUT_MODIFIER) {
            if key.code == KeyCode::Char('r') {
                login.toggle_password_visibility();
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab | KeyCode::Down => login.next_field(),
            KeyCode::BackTab | KeyCode::Up => login.prev_field(),
            KeyCode::Enter if login.is_button_active() => {
                tracing::info!(email = %login.form().email, "login submitted");
                self.state.status_message = Some("Welcome again!".to_string());
                self.navigate(View::Dashboard);
            }
            KeyCode::Enter => login.next_field(),
            KeyCode::Backspace => login.backspace(),
            KeyCode::Char(c) => login.input_char(c),
            _ => {}
        }
    }

    fn handle_signup_key(&mut self, key: KeyEvent) {
        let Some(flow) = self.state.signup.as_mut() else {
            self.state.current_view = View::Home;
            return;
        };

        if key.modifiers.contains(SHORTCUT_MODIFIER) {
            match key.code {
                KeyCode::Char('r') => flow.toggle_reveal(),
                KeyCode::Char('l') => self.navigate(View::Login),
                _ => {}
            }
            return;
        }

        let on_buttons = flow.is_buttons_row_active();
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab | KeyCode::Down => flow.next_field(),
            KeyCode::BackTab | KeyCode::Up => flow.prev_field(),
            KeyCode::Left if on_buttons => flow.selected_button = WizardButton::Previous,
            KeyCode::Right if on_buttons => flow.selected_button = WizardButton::Next,
            KeyCode::Enter if on_buttons => match flow.selected_button {
                WizardButton::Previous => {
                    if let Err(err) = flow.previous_step() {
                        tracing::debug!("previous ignored: {err}");
                    }
                }
                WizardButton::Next if flow.wizard().is_last_step() => self.finish_signup(),
                WizardButton::Next => {
                    if let Err(err) = flow.next_step() {
                        tracing::debug!("next ignored: {err}");
                    }
                }
            },
            KeyCode::Enter => flow.next_field(),
            KeyCode::Backspace => flow.backspace(),
            KeyCode::Char(c) => flow.input_char(c),
            _ => {}
        }
    }

    /// Run the completion handler. A refused finish leaves the wizard open;
    /// a finished wizard is discarded whatever the handler reports.
    fn finish_signup(&mut self) {
        let Some(flow) = self.state.signup.take() else {
            return;
        };
        let profiles = self.profiles.as_ref();
        match flow.finish(|form| complete_signup(form, profiles)) {
            Ok(Ok(profile)) => {
                self.state.profile = Some(profile);
                self.state.status_message = Some("Account created.".to_string());
                self.state.view_history.clear();
                self.state.view_history.push(View::Home);
                self.enter_view(View::Dashboard);
            }
            Ok(Err(err)) => {
                tracing::error!("Failed to save profile: {err:#}");
                self.push_error(format!("Failed to save your profile: {err:#}"));
                self.state.view_history.clear();
                self.state.current_view = View::Home;
            }
            Err((flow, err)) => {
                tracing::debug!("finish ignored: {err}");
                self.state.signup = Some(flow);
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => self.go_back(),
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('s') if self.state.profile.is_none() => self.navigate(View::Signup),
            KeyCode::Char('r') => self.refresh_dashboard(),
            KeyCode::Char('y') => self.copy_recommendation()?,
            _ => {}
        }
        Ok(())
    }

    /// Copy the crop recommendation to the clipboard
    fn copy_recommendation(&mut self) -> Result<()> {
        let Some(prediction) = self.state.dashboard.prediction.loaded() else {
            self.state.status_message = Some("No recommendation yet".to_string());
            return Ok(());
        };
        let text = format!(
            "Recommended: {}\n\n{}",
            prediction.prediction, prediction.description
        );
        match copy_to_clipboard(&text) {
            Ok(()) => self.state.status_message = Some("Copied recommendation".to_string()),
            Err(err) => self.push_error(format!("Clipboard unavailable: {err}")),
        }
        Ok(())
    }

    /// Wait for the next background result and apply it
    #[cfg(test)]
    async fn next_event(&mut self) -> bool {
        let wait = tokio::time::timeout(std::time::Duration::from_secs(2), self.events_rx.recv());
        match wait.await {
            Ok(Some(event)) => {
                self.apply_event(event);
                true
            }
            _ => false,
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockFarmApi, MockGeolocationProvider};
    use crate::state::{PanelState, SignupField};
    use crate::storage::{FarmProfile, MockProfileStore};
    use anyhow::anyhow;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use uuid::Uuid;

    const CAIRO: FarmLocation = FarmLocation {
        latitude: 30.0444,
        longitude: 31.2357,
    };

    fn quiet_config() -> TuiConfig {
        TuiConfig {
            skip_splash: Some(true),
            ..Default::default()
        }
    }

    fn failing_api() -> MockFarmApi {
        let mut api = MockFarmApi::new();
        api.expect_weather().returning(|_| Err(anyhow!("down")));
        api.expect_rainfall().returning(|_| Err(anyhow!("down")));
        api.expect_soil().returning(|_| Err(anyhow!("down")));
        api.expect_prediction().returning(|_| Err(anyhow!("down")));
        api
    }

    fn locating_at(location: FarmLocation) -> MockGeolocationProvider {
        let mut geo = MockGeolocationProvider::new();
        geo.expect_locate().times(..=1).returning(move || Ok(location));
        geo
    }

    fn empty_store() -> MockProfileStore {
        let mut store = MockProfileStore::new();
        store.expect_load().returning(|| Ok(None));
        store
    }

    fn profile() -> FarmProfile {
        FarmProfile {
            id: Uuid::new_v4(),
            username: "farmer".into(),
            email: "farmer@example.com".into(),
            location: CAIRO,
            created_at: Utc::now(),
        }
    }

    fn app_with(
        config: TuiConfig,
        api: MockFarmApi,
        geo: MockGeolocationProvider,
        store: MockProfileStore,
    ) -> App {
        App::with_services(config, Arc::new(api), Arc::new(geo), Box::new(store))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).await.unwrap();
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_starts_on_splash_by_default() {
            let app = app_with(
                TuiConfig::default(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            assert!(app.in_splash());
            assert!(app.splash_state.is_some());
        }

        #[tokio::test]
        async fn test_splash_key_skips_to_start_route() {
            let config = TuiConfig {
                start_route: Some("/auth/login".into()),
                ..Default::default()
            };
            let mut app = app_with(
                config,
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            press(&mut app, KeyCode::Char('x')).await;
            assert!(app.update_splash(24));
            assert_eq!(app.state.current_view, View::Login);
        }

        #[tokio::test]
        async fn test_unknown_start_route_opens_home() {
            let config = TuiConfig {
                start_route: Some("/nowhere".into()),
                skip_splash: Some(true),
                ..Default::default()
            };
            let app = app_with(
                config,
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            assert_eq!(app.state.current_view, View::Home);
        }

        #[tokio::test]
        async fn test_home_keys_and_back() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            press(&mut app, KeyCode::Char('l')).await;
            assert_eq!(app.state.current_view, View::Login);
            press(&mut app, KeyCode::Esc).await;
            assert_eq!(app.state.current_view, View::Home);
            press(&mut app, KeyCode::Char('q')).await;
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_errors_are_modal() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            app.push_error("boom");
            press(&mut app, KeyCode::Char('l')).await;
            assert_eq!(app.state.current_view, View::Home);
            press(&mut app, KeyCode::Enter).await;
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_profile_load_failure_is_not_fatal() {
            let mut store = MockProfileStore::new();
            store.expect_load().returning(|| Err(anyhow!("corrupt")));
            let app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                store,
            );
            assert!(app.state.profile.is_none());
        }
    }

    mod signup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_opening_signup_prefills_location_once() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                locating_at(CAIRO),
                empty_store(),
            );
            press(&mut app, KeyCode::Enter).await;
            assert_eq!(app.state.current_view, View::Signup);
            assert!(app.next_event().await);

            let flow = app.state.signup.as_ref().unwrap();
            assert_eq!(flow.form().latitude, Some(30.0444));
            assert_eq!(flow.field(SignupField::Longitude).as_text(), "31.2357");

            // leaving and coming back keeps the same flow and does not relocate
            press(&mut app, KeyCode::Esc).await;
            press(&mut app, KeyCode::Enter).await;
            assert!(app.state.signup.as_ref().unwrap().geolocation_requested);
        }

        #[tokio::test]
        async fn test_geolocation_does_not_override_typed_coordinates() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            app.state.signup = Some(SignupFlow::new("placeholder").unwrap());
            app.state.current_view = View::Signup;
            app.state
                .signup
                .as_mut()
                .unwrap()
                .dispatch(crate::state::SignupAction::SetLongitude(10.0));
            app.apply_event(AppEvent::Geolocated(CAIRO));
            let form = app.state.signup.as_ref().unwrap().form();
            assert_eq!(form.longitude, Some(10.0));
            assert_eq!(form.latitude, Some(30.0444));
        }

        #[tokio::test]
        async fn test_invalid_step_blocks_next() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                locating_at(CAIRO),
                empty_store(),
            );
            press(&mut app, KeyCode::Enter).await;
            type_str(&mut app, "ab").await;
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Enter).await;
            let flow = app.state.signup.as_ref().unwrap();
            assert_eq!(flow.wizard().active_index(), 0);
            assert!(flow.errors().is_invalid(SignupField::Username));
        }

        #[tokio::test]
        async fn test_full_signup_saves_once_and_opens_dashboard() {
            let mut store = empty_store();
            store
                .expect_save()
                .withf(|p| p.username == "validuser" && p.location == CAIRO)
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(quiet_config(), failing_api(), locating_at(CAIRO), store);

            press(&mut app, KeyCode::Enter).await;
            assert!(app.next_event().await);

            type_str(&mut app, "validuser").await;
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Enter).await;
            assert_eq!(app.state.signup.as_ref().unwrap().wizard().active_index(), 1);

            type_str(&mut app, "user@example.com").await;
            press(&mut app, KeyCode::Tab).await;
            type_str(&mut app, "Abcdef1!").await;
            press(&mut app, KeyCode::Tab).await;
            type_str(&mut app, "Abcdef1!").await;
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Enter).await;
            assert_eq!(app.state.signup.as_ref().unwrap().wizard().active_index(), 2);

            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Enter).await;

            assert!(app.state.signup.is_none());
            assert_eq!(app.state.current_view, View::Dashboard);
            assert_eq!(app.state.status_message.as_deref(), Some("Account created."));
            assert_eq!(app.state.dashboard.location, Some(CAIRO));
            assert_eq!(app.state.profile.as_ref().unwrap().email, "user@example.com");
        }

        #[tokio::test]
        async fn test_save_failure_discards_wizard_and_reports() {
            let mut store = empty_store();
            store
                .expect_save()
                .times(1)
                .returning(|_| Err(anyhow!("disk full")));
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                store,
            );
            let mut flow = SignupFlow::new("placeholder").unwrap();
            for action in [
                crate::state::SignupAction::SetUsername("validuser".into()),
                crate::state::SignupAction::SetEmail("user@example.com".into()),
                crate::state::SignupAction::SetPassword("Abcdef1!".into()),
                crate::state::SignupAction::SetConfirmPassword("Abcdef1!".into()),
                crate::state::SignupAction::SetLongitude(31.0),
                crate::state::SignupAction::SetLatitude(30.0),
            ] {
                flow.dispatch(action);
            }
            flow.next_step().unwrap();
            flow.next_step().unwrap();
            flow.geolocation_requested = true;
            app.state.signup = Some(flow);
            app.state.current_view = View::Signup;

            app.finish_signup();

            assert!(app.state.signup.is_none());
            assert_eq!(app.state.current_view, View::Home);
            assert!(app.state.current_error().unwrap().contains("disk full"));
        }

        #[tokio::test]
        async fn test_reveal_shortcut_toggles_focused_password() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            let mut flow = SignupFlow::new("placeholder").unwrap();
            flow.geolocation_requested = true;
            flow.dispatch(crate::state::SignupAction::SetUsername("validuser".into()));
            flow.next_step().unwrap();
            flow.active_field_index = 1;
            app.state.signup = Some(flow);
            app.state.current_view = View::Signup;

            app.handle_key(KeyEvent::new(KeyCode::Char('r'), SHORTCUT_MODIFIER))
                .await
                .unwrap();
            let flow = app.state.signup.as_ref().unwrap();
            assert!(flow.show_password);
            assert!(!flow.show_confirm_password);
        }
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_login_button_shows_toast_and_opens_dashboard() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            press(&mut app, KeyCode::Char('l')).await;
            assert!(app.state.login.is_email_invalid());
            type_str(&mut app, "a@b.co").await;
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Enter).await;
            assert_eq!(app.state.current_view, View::Dashboard);
            assert_eq!(app.state.status_message.as_deref(), Some("Welcome again!"));
            assert_eq!(app.state.login.form().email, "a@b.co");
        }
    }

    mod dashboard {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::time::Duration;

        #[tokio::test]
        async fn test_without_profile_offers_signup() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            press(&mut app, KeyCode::Char('d')).await;
            assert_eq!(app.state.current_view, View::Dashboard);
            assert!(app.state.dashboard.location.is_none());
            assert!(!app.state.dashboard.is_loading());
            app.state.signup = Some(SignupFlow::new("placeholder").unwrap());
            app.state.signup.as_mut().unwrap().geolocation_requested = true;
            press(&mut app, KeyCode::Char('s')).await;
            assert_eq!(app.state.current_view, View::Signup);
        }

        #[tokio::test]
        async fn test_fetches_all_panels_in_parallel() {
            let mut api = MockFarmApi::new();
            api.expect_weather()
                .times(1)
                .returning(|_| Ok(WeatherReport { days: vec![] }));
            api.expect_rainfall().times(1).returning(|_| Ok(vec![]));
            api.expect_soil().times(1).returning(|_| Err(anyhow!("timeout")));
            api.expect_prediction().times(1).returning(|_| {
                Ok(Prediction {
                    prediction: "Wheat".into(),
                    description: "Sow in November.".into(),
                })
            });
            let mut store = MockProfileStore::new();
            store.expect_load().returning(|| Ok(Some(profile())));
            let config = TuiConfig {
                start_route: Some("/dashboard".into()),
                skip_splash: Some(true),
                ..Default::default()
            };
            let mut app = app_with(config, api, MockGeolocationProvider::new(), store);
            assert!(app.state.dashboard.is_loading());

            for _ in 0..4 {
                assert!(app.next_event().await);
            }

            let dashboard = &app.state.dashboard;
            assert!(!dashboard.is_loading());
            assert_eq!(dashboard.soil, PanelState::Failed);
            assert_eq!(
                dashboard.prediction.loaded().map(|p| p.prediction.as_str()),
                Some("Wheat")
            );
        }

        #[tokio::test]
        async fn test_refetch_key_reloads() {
            let mut store = MockProfileStore::new();
            store.expect_load().returning(|| Ok(Some(profile())));
            let mut app = app_with(
                quiet_config(),
                failing_api(),
                MockGeolocationProvider::new(),
                store,
            );
            press(&mut app, KeyCode::Char('d')).await;
            for _ in 0..4 {
                assert!(app.next_event().await);
            }
            assert_eq!(app.state.dashboard.weather, PanelState::Failed);

            press(&mut app, KeyCode::Char('r')).await;
            assert!(app.state.dashboard.is_loading());
        }

        /// Weather times out slowly on the first call and succeeds after
        struct SlowFirstWeather {
            calls: AtomicUsize,
        }

        #[async_trait::async_trait]
        impl FarmApi for SlowFirstWeather {
            async fn weather(&self, _location: FarmLocation) -> Result<WeatherReport> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    return Err(anyhow!("timed out"));
                }
                Ok(WeatherReport { days: vec![] })
            }

            async fn rainfall(&self, _location: FarmLocation) -> Result<Vec<RainfallRecord>> {
                Err(anyhow!("down"))
            }

            async fn soil(&self, _location: FarmLocation) -> Result<SoilProperties> {
                Err(anyhow!("down"))
            }

            async fn prediction(&self, _location: FarmLocation) -> Result<Prediction> {
                Err(anyhow!("down"))
            }
        }

        #[tokio::test]
        async fn test_refetch_ignores_late_result_from_earlier_fetch() {
            let mut store = MockProfileStore::new();
            store.expect_load().returning(|| Ok(Some(profile())));
            let api = SlowFirstWeather {
                calls: AtomicUsize::new(0),
            };
            let mut app = App::with_services(
                quiet_config(),
                Arc::new(api),
                Arc::new(MockGeolocationProvider::new()),
                Box::new(store),
            );
            press(&mut app, KeyCode::Char('d')).await;
            press(&mut app, KeyCode::Char('r')).await;

            for _ in 0..8 {
                assert!(app.next_event().await);
            }

            assert_eq!(
                app.state.dashboard.weather,
                PanelState::Loaded(WeatherReport { days: vec![] })
            );
            assert!(!app.state.dashboard.is_loading());
        }

        #[tokio::test]
        async fn test_copy_without_prediction_sets_message() {
            let mut app = app_with(
                quiet_config(),
                MockFarmApi::new(),
                MockGeolocationProvider::new(),
                empty_store(),
            );
            press(&mut app, KeyCode::Char('d')).await;
            press(&mut app, KeyCode::Char('y')).await;
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("No recommendation yet")
            );
        }
    }
}
