//! Signup form state, its actions and the reducer that applies them

use super::validators::{
    validate_confirm_password, validate_email, validate_latitude, validate_longitude,
    validate_password, validate_username,
};
use super::wizard::Step;

/// Aggregate signup values. Every field starts unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

/// The closed set of mutations the signup store accepts
#[derive(Debug, Clone, PartialEq)]
pub enum SignupAction {
    SetUsername(String),
    SetEmail(String),
    SetPassword(String),
    SetConfirmPassword(String),
    SetLongitude(f64),
    SetLatitude(f64),
    Reset,
}

/// Apply one action, returning the next state. Only the named field changes.
pub fn reduce(state: &SignupForm, action: SignupAction) -> SignupForm {
    match action {
        SignupAction::SetUsername(v) => SignupForm {
            username: Some(v),
            ..state.clone()
        },
        SignupAction::SetEmail(v) => SignupForm {
            email: Some(v),
            ..state.clone()
        },
        SignupAction::SetPassword(v) => SignupForm {
            password: Some(v),
            ..state.clone()
        },
        SignupAction::SetConfirmPassword(v) => SignupForm {
            confirm_password: Some(v),
            ..state.clone()
        },
        SignupAction::SetLongitude(v) => SignupForm {
            longitude: Some(v),
            ..state.clone()
        },
        SignupAction::SetLatitude(v) => SignupForm {
            latitude: Some(v),
            ..state.clone()
        },
        SignupAction::Reset => SignupForm::default(),
    }
}

/// Single owner of the signup values; `dispatch` is the only way in
#[derive(Debug, Clone, Default)]
pub struct SignupStore {
    state: SignupForm,
}

impl SignupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SignupForm {
        &self.state
    }

    pub fn dispatch(&mut self, action: SignupAction) -> &SignupForm {
        tracing::trace!(?action, "signup dispatch");
        self.state = reduce(&self.state, action);
        &self.state
    }
}

/// Inputs of the signup form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupField {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Longitude,
    Latitude,
}

impl SignupField {
    pub const ALL: [SignupField; 6] = [
        SignupField::Username,
        SignupField::Email,
        SignupField::Password,
        SignupField::ConfirmPassword,
        SignupField::Longitude,
        SignupField::Latitude,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm your password",
            Self::Longitude => "Longitude",
            Self::Latitude => "Latitude",
        }
    }

    /// Helper text shown under a valid field
    pub fn help(&self) -> &'static str {
        match self {
            Self::Username => "Enter your username.",
            Self::Email => "We'll use this address to reach you.",
            Self::Password => "Upper, lower, digit and special character; 8+ long.",
            Self::ConfirmPassword => "Type the same password again.",
            Self::Longitude | Self::Latitude => "Enter the location of your farm land.",
        }
    }

    /// Hint shown when the field is flagged invalid
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Username => "3-20 letters, digits or underscores, no spaces.",
            Self::Email => "Enter an address like name@domain.com.",
            Self::Password => {
                "At least 8 characters with an uppercase, a lowercase, a digit and a symbol."
            }
            Self::ConfirmPassword => "Passwords do not match.",
            Self::Longitude => "Longitude must be a number between -180 and 180.",
            Self::Latitude => "Latitude must be a number between -90 and 90.",
        }
    }

    /// Build the action that stores `text` in this field.
    /// Coordinates that do not parse become NaN so they fail validation.
    pub fn action_for(&self, text: &str) -> SignupAction {
        match self {
            Self::Username => SignupAction::SetUsername(text.to_string()),
            Self::Email => SignupAction::SetEmail(text.to_string()),
            Self::Password => SignupAction::SetPassword(text.to_string()),
            Self::ConfirmPassword => SignupAction::SetConfirmPassword(text.to_string()),
            Self::Longitude => SignupAction::SetLongitude(parse_coordinate(text)),
            Self::Latitude => SignupAction::SetLatitude(parse_coordinate(text)),
        }
    }
}

pub fn parse_coordinate(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

impl SignupForm {
    pub fn is_field_valid(&self, field: SignupField) -> bool {
        match field {
            SignupField::Username => self.username.as_deref().is_some_and(validate_username),
            SignupField::Email => self.email.as_deref().is_some_and(validate_email),
            SignupField::Password => self.password.as_deref().is_some_and(validate_password),
            SignupField::ConfirmPassword => match (&self.confirm_password, &self.password) {
                (Some(confirm), Some(password)) => validate_confirm_password(confirm, password),
                _ => false,
            },
            SignupField::Longitude => validate_longitude(self.longitude),
            SignupField::Latitude => validate_latitude(self.latitude),
        }
    }

    pub fn is_field_set(&self, field: SignupField) -> bool {
        match field {
            SignupField::Username => self.username.is_some(),
            SignupField::Email => self.email.is_some(),
            SignupField::Password => self.password.is_some(),
            SignupField::ConfirmPassword => self.confirm_password.is_some(),
            SignupField::Longitude => self.longitude.is_some(),
            SignupField::Latitude => self.latitude.is_some(),
        }
    }

    pub fn are_fields_valid(&self, fields: &[SignupField]) -> bool {
        fields.iter().all(|f| self.is_field_valid(*f))
    }
}

/// Derived per-field invalid flags.
///
/// A field is flagged only once it holds a value that fails its
/// validator; unset fields still block the step but are not shouted at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: bool,
    pub email: bool,
    pub password: bool,
    pub confirm_password: bool,
    pub longitude: bool,
    pub latitude: bool,
}

impl FieldErrors {
    pub fn evaluate(form: &SignupForm) -> Self {
        let flag = |field| form.is_field_set(field) && !form.is_field_valid(field);
        Self {
            username: flag(SignupField::Username),
            email: flag(SignupField::Email),
            password: flag(SignupField::Password),
            confirm_password: flag(SignupField::ConfirmPassword),
            longitude: flag(SignupField::Longitude),
            latitude: flag(SignupField::Latitude),
        }
    }

    pub fn is_invalid(&self, field: SignupField) -> bool {
        match field {
            SignupField::Username => self.username,
            SignupField::Email => self.email,
            SignupField::Password => self.password,
            SignupField::ConfirmPassword => self.confirm_password,
            SignupField::Longitude => self.longitude,
            SignupField::Latitude => self.latitude,
        }
    }
}

pub const USERNAME_STEP_FIELDS: &[SignupField] = &[SignupField::Username];
pub const AUTH_STEP_FIELDS: &[SignupField] = &[
    SignupField::Email,
    SignupField::Password,
    SignupField::ConfirmPassword,
];
pub const LOCATION_STEP_FIELDS: &[SignupField] = &[SignupField::Longitude, SignupField::Latitude];

/// Fields edited on the given signup step
pub fn step_fields(index: usize) -> &'static [SignupField] {
    match index {
        0 => USERNAME_STEP_FIELDS,
        1 => AUTH_STEP_FIELDS,
        2 => LOCATION_STEP_FIELDS,
        _ => &[],
    }
}

/// Username, authentication and location steps
pub fn signup_steps() -> Vec<Step<SignupForm>> {
    vec![
        Step::new("Username", "Setup your username", |form: &SignupForm| {
            form.are_fields_valid(USERNAME_STEP_FIELDS)
        }),
        Step::new(
            "Authentication Information",
            "Set your email and password",
            |form: &SignupForm| form.are_fields_valid(AUTH_STEP_FIELDS),
        ),
        Step::new(
            "Location Setup",
            "Setup the location of your farm land",
            |form: &SignupForm| form.are_fields_valid(LOCATION_STEP_FIELDS),
        ),
    ]
}
