//! Form focus handling and the signup flow that ties edit buffers,
//! the signup store and the wizard together

use super::field::FormField;
use super::signup::{step_fields, signup_steps, FieldErrors, SignupAction, SignupField, SignupForm, SignupStore};
use super::wizard::{Unfinished, Wizard, WizardError};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Which navigation button is selected when focus is on the buttons row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardButton {
    Previous,
    #[default]
    Next,
}

/// Everything the signup screen needs between key presses.
///
/// Typing edits a `FormField` buffer and immediately dispatches the
/// matching action, so the store is always the source of truth for
/// validation while the buffer keeps exactly what the user typed.
#[derive(Debug)]
pub struct SignupFlow {
    store: SignupStore,
    wizard: Wizard<SignupForm>,
    fields: Vec<FormField>,
    /// Index into the active step's fields; one past the end is the buttons row
    pub active_field_index: usize,
    pub selected_button: WizardButton,
    pub show_password: bool,
    pub show_confirm_password: bool,
    /// Whether the one-off location lookup has been started
    pub geolocation_requested: bool,
}

impl SignupFlow {
    pub fn new(password_placeholder: &str) -> Result<Self, WizardError> {
        let fields = SignupField::ALL
            .iter()
            .map(|field| {
                let label = field.label();
                match field {
                    SignupField::Username => FormField::text(label)
                        .with_placeholder("Username"),
                    SignupField::Email => FormField::text(label)
                        .with_placeholder("name@domain.com"),
                    SignupField::Password | SignupField::ConfirmPassword => {
                        FormField::secret(label)
                            .with_placeholder(password_placeholder)
                    }
                    SignupField::Longitude => {
                        FormField::coordinate(label).with_placeholder("31.2357")
                    }
                    SignupField::Latitude => {
                        FormField::coordinate(label).with_placeholder("30.0444")
                    }
                }
            })
            .collect();

        Ok(Self {
            store: SignupStore::new(),
            wizard: Wizard::new(signup_steps())?,
            fields,
            active_field_index: 0,
            selected_button: WizardButton::default(),
            show_password: false,
            show_confirm_password: false,
            geolocation_requested: false,
        })
    }

    pub fn form(&self) -> &SignupForm {
        self.store.state()
    }

    pub fn wizard(&self) -> &Wizard<SignupForm> {
        &self.wizard
    }

    /// Current per-field error flags, derived from the store
    pub fn errors(&self) -> FieldErrors {
        FieldErrors::evaluate(self.store.state())
    }

    pub fn field(&self, field: SignupField) -> &FormField {
        &self.fields[Self::slot(field)]
    }

    fn slot(field: SignupField) -> usize {
        SignupField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default()
    }

    /// Fields shown on the current step
    pub fn current_fields(&self) -> &'static [SignupField] {
        step_fields(self.wizard.active_index())
    }

    /// The focused input, or `None` when the buttons row is focused
    pub fn active_input(&self) -> Option<SignupField> {
        self.current_fields().get(self.active_field_index).copied()
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_input().is_none()
    }

    pub fn is_revealed(&self, field: SignupField) -> bool {
        match field {
            SignupField::Password => self.show_password,
            SignupField::ConfirmPassword => self.show_confirm_password,
            _ => true,
        }
    }

    /// Show/hide the focused password field
    pub fn toggle_reveal(&mut self) {
        match self.active_input() {
            Some(SignupField::Password) => self.show_password = !self.show_password,
            Some(SignupField::ConfirmPassword) => {
                self.show_confirm_password = !self.show_confirm_password
            }
            _ => {}
        }
    }

    /// Store-level dispatch. Buffers of externally set fields are refreshed.
    pub fn dispatch(&mut self, action: SignupAction) {
        match &action {
            SignupAction::SetLongitude(v) => {
                self.fields[Self::slot(SignupField::Longitude)].set_text(format_coordinate(*v))
            }
            SignupAction::SetLatitude(v) => {
                self.fields[Self::slot(SignupField::Latitude)].set_text(format_coordinate(*v))
            }
            SignupAction::Reset => self.fields.iter_mut().for_each(FormField::clear),
            _ => {}
        }
        self.store.dispatch(action);
    }

    fn sync_field(&mut self, field: SignupField) {
        let action = field.action_for(self.fields[Self::slot(field)].as_text());
        self.store.dispatch(action);
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            if self.fields[Self::slot(field)].push_char(c) {
                self.sync_field(field);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.active_input() {
            if self.fields[Self::slot(field)].pop_char() {
                self.sync_field(field);
            }
        }
    }

    /// Apply a best-effort location fix. Only coordinates the user has not
    /// touched are filled in. Returns whether anything changed.
    pub fn apply_geolocation(&mut self, latitude: f64, longitude: f64) -> bool {
        let mut changed = false;
        if self.form().longitude.is_none() {
            self.dispatch(SignupAction::SetLongitude(longitude));
            changed = true;
        }
        if self.form().latitude.is_none() {
            self.dispatch(SignupAction::SetLatitude(latitude));
            changed = true;
        }
        changed
    }

    pub fn can_advance(&self) -> bool {
        self.wizard.can_advance(self.store.state())
    }

    pub fn can_go_back(&self) -> bool {
        self.wizard.can_go_back()
    }

    pub fn can_finish(&self) -> bool {
        self.wizard.can_finish(self.store.state())
    }

    /// Whether the primary (Next or Done) button is enabled
    pub fn primary_enabled(&self) -> bool {
        if self.wizard.is_last_step() {
            self.can_finish()
        } else {
            self.can_advance()
        }
    }

    pub fn next_step(&mut self) -> Result<usize, WizardError> {
        let index = self.wizard.next(self.store.state())?;
        self.active_field_index = 0;
        self.selected_button = WizardButton::Next;
        Ok(index)
    }

    pub fn previous_step(&mut self) -> Result<usize, WizardError> {
        let index = self.wizard.previous()?;
        self.active_field_index = 0;
        self.selected_button = WizardButton::Next;
        Ok(index)
    }

    /// Finish the wizard, consuming the flow. On refusal the flow is
    /// returned unchanged together with the reason.
    pub fn finish<R>(
        self,
        on_complete: impl FnOnce(&SignupForm) -> R,
    ) -> Result<R, (Self, WizardError)> {
        let Self {
            store,
            wizard,
            fields,
            active_field_index,
            selected_button,
            show_password,
            show_confirm_password,
            geolocation_requested,
        } = self;

        match wizard.finish(store.state(), on_complete) {
            Ok(result) => Ok(result),
            Err(Unfinished { wizard, error }) => Err((
                Self {
                    store,
                    wizard,
                    fields,
                    active_field_index,
                    selected_button,
                    show_password,
                    show_confirm_password,
                    geolocation_requested,
                },
                error,
            )),
        }
    }
}

impl Form for SignupFlow {
    fn field_count(&self) -> usize {
        self.current_fields().len() + 1 // inputs + buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.current_fields().len());
    }
}

fn format_coordinate(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}
