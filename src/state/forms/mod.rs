//! Form domain layer
//!
//! Field validators, the signup store and wizard, the decorative login
//! form, and signup completion.

mod completion;
mod field;
mod form_state;
mod login;
mod password;
mod signup;
mod validators;
mod wizard;

pub use completion::complete_signup;
pub use field::FormField;
pub use form_state::{Form, SignupFlow, WizardButton};
pub use login::LoginView;
pub use password::{generate_password, SUGGESTED_PASSWORD_LEN};
pub use wizard::StepStatus;

#[cfg(test)]
pub use signup::{SignupAction, SignupField};
