//! Form bodies accepted by the HTML handlers.
//!
//! Every field defaults to an empty string so a missing input reaches domain
//! validation instead of failing extraction. Password fields never appear in
//! `Debug` output.

use std::fmt;

use serde::Deserialize;

const REDACTED: &str = "<redacted>";

/// `POST /` body.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("name", &self.name)
            .field("password", &REDACTED)
            .finish()
    }
}

/// `POST /register/` body.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("confirm", &REDACTED)
            .finish()
    }
}

/// `POST /add/` body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    pub name: String,
    pub due_date: String,
    pub priority: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_debug_hides_password() {
        let form = LoginForm {
            name: "Michael".to_owned(),
            password: "python".to_owned(),
        };
        let rendered = format!("{form:?}");
        assert!(rendered.contains("Michael"));
        assert!(rendered.contains(REDACTED));
        assert!(!rendered.contains("python"));
    }

    #[test]
    fn register_form_debug_hides_both_passwords() {
        let form = RegisterForm {
            name: "Michael".to_owned(),
            email: "michael@realpython.pl".to_owned(),
            password: "python".to_owned(),
            confirm: "pithon".to_owned(),
        };
        let rendered = format!("{form:?}");
        assert!(rendered.contains("michael@realpython.pl"));
        assert!(!rendered.contains("\"python\""));
        assert!(!rendered.contains("pithon"));
    }
}
