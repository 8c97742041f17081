//! Login form inputs. Credentials are never checked.

use crate::error::FlowError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Mobile number, email, or partner id.
    pub login_id: String,
    pub password: String,
    pub show_password: bool,
}

impl LoginForm {
    pub fn set_login_id(&mut self, value: impl Into<String>) {
        self.login_id = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    pub fn toggle_password_visibility(&mut self) -> bool {
        self.show_password = !self.show_password;
        self.show_password
    }

    /// Password as the field renders it.
    pub fn displayed_password(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }

    /// Login is enabled once both inputs hold something besides whitespace.
    pub fn can_submit(&self) -> bool {
        !self.login_id.trim().is_empty() && !self.password.trim().is_empty()
    }

    pub fn check_submit(&self) -> Result<(), FlowError> {
        if self.can_submit() {
            Ok(())
        } else {
            Err(FlowError::LoginIncomplete)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_needs_both_inputs() {
        let mut form = LoginForm::default();
        assert_eq!(form.check_submit(), Err(FlowError::LoginIncomplete));

        form.set_login_id("partner-042");
        assert!(!form.can_submit());

        form.set_password("   ");
        assert!(!form.can_submit());

        form.set_password("hunter2");
        assert!(form.can_submit());

        form.set_login_id("  ");
        assert!(!form.can_submit());
    }

    #[test]
    fn password_masking() {
        let mut form = LoginForm::default();
        form.set_password("abc");
        assert_eq!(form.displayed_password(), "•••");
        assert!(form.toggle_password_visibility());
        assert_eq!(form.displayed_password(), "abc");
        assert!(!form.toggle_password_visibility());
    }
}
