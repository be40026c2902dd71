//! Form rendering module
//!
//! - `field_renderer`: bordered inputs with help and hint lines
//! - `signup_form`: the signup wizard
//! - `login_form`: the login card

mod field_renderer;
mod login_form;
mod signup_form;

pub use login_form::draw_login;
pub use signup_form::draw_signup;
