//! Password policy applied to new passwords.

use tracing::debug;

use certmatch_core::config::AuthConfig;
use certmatch_core::error::AppError;

/// Checks candidate passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    require_mixed: bool,
}

impl PasswordValidator {
    /// Creates a validator from the `auth` configuration section.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            require_mixed: config.password_require_mixed,
        }
    }

    /// Returns the first policy violation, if any.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }

        if self.require_mixed {
            let has_letter = password.chars().any(char::is_alphabetic);
            let has_digit = password.chars().any(|c| c.is_ascii_digit());
            if !(has_letter && has_digit) {
                debug!(has_letter, has_digit, "Password rejected by mixed-character rule");
                return Err(AppError::validation(
                    "Password must contain at least one letter and one digit",
                ));
            }
        }

        Ok(())
    }
}
