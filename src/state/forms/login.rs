//! Login form. Purely decorative: credentials are never checked.

use super::field::FormField;
use super::form_state::Form;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    SetEmail(String),
    SetPassword(String),
}

pub fn reduce_login(state: &LoginForm, action: LoginAction) -> LoginForm {
    match action {
        LoginAction::SetEmail(email) => LoginForm {
            email,
            ..state.clone()
        },
        LoginAction::SetPassword(password) => LoginForm {
            password,
            ..state.clone()
        },
    }
}

/// Index of the Login button in the focus order
pub const LOGIN_BUTTON_INDEX: usize = 2;

/// Login screen state: form values, edit buffers and focus
#[derive(Debug, Clone)]
pub struct LoginView {
    form: LoginForm,
    pub email: FormField,
    pub password: FormField,
    pub show_password: bool,
    pub active_field_index: usize,
}

impl LoginView {
    pub fn new(password_placeholder: String) -> Self {
        Self {
            form: LoginForm::default(),
            email: FormField::text("Email").with_placeholder("name@domain.com"),
            password: FormField::secret("Password")
                .with_placeholder(password_placeholder),
            show_password: false,
            active_field_index: 0,
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn dispatch(&mut self, action: LoginAction) {
        self.form = reduce_login(&self.form, action);
    }

    pub fn is_email_invalid(&self) -> bool {
        self.form.email.is_empty()
    }

    pub fn is_password_invalid(&self) -> bool {
        self.form.password.is_empty()
    }

    pub fn is_button_active(&self) -> bool {
        self.active_field_index == LOGIN_BUTTON_INDEX
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field_index {
            0 => {
                if self.email.push_char(c) {
                    self.dispatch(LoginAction::SetEmail(self.email.value.clone()));
                }
            }
            1 => {
                if self.password.push_char(c) {
                    self.dispatch(LoginAction::SetPassword(self.password.value.clone()));
                }
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field_index {
            0 => {
                if self.email.pop_char() {
                    self.dispatch(LoginAction::SetEmail(self.email.value.clone()));
                }
            }
            1 => {
                if self.password.pop_char() {
                    self.dispatch(LoginAction::SetPassword(self.password.value.clone()));
                }
            }
            _ => {}
        }
    }
}

impl Form for LoginView {
    fn field_count(&self) -> usize {
        3 // email, password, login button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(LOGIN_BUTTON_INDEX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reducer_sets_single_field() {
        let state = reduce_login(&LoginForm::default(), LoginAction::SetEmail("a@b.c".into()));
        assert_eq!(state.email, "a@b.c");
        assert!(state.password.is_empty());
    }

    #[test]
    fn test_empty_fields_render_invalid() {
        let mut view = LoginView::new("Xy7!".into());
        assert!(view.is_email_invalid());
        assert!(view.is_password_invalid());

        for c in "me@farm.io".chars() {
            view.input_char(c);
        }
        assert!(!view.is_email_invalid());
        assert_eq!(view.form().email, "me@farm.io");
    }

    #[test]
    fn test_typing_follows_focus() {
        let mut view = LoginView::new(String::new());
        view.next_field();
        view.input_char('p');
        view.input_char('w');
        view.backspace();
        assert_eq!(view.form().password, "p");
        assert!(view.form().email.is_empty());
    }

    #[test]
    fn test_focus_cycles_through_button() {
        let mut view = LoginView::new(String::new());
        view.next_field();
        view.next_field();
        assert!(view.is_button_active());
        view.input_char('x');
        assert_eq!(view.form(), &LoginForm::default());
        view.next_field();
        assert_eq!(view.active_field(), 0);
    }
}
