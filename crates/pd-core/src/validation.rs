//! Client-side checks applied before a form reaches the gateway.

use crate::{CoreError, Result as CoreErrorResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_FULL_NAME_LENGTH: usize = 2;
pub const MIN_API_KEY_LENGTH: usize = 10;

/// Validates login, registration and profile form input.
pub struct FormValidator;

impl FormValidator {
    #[track_caller]
    pub fn validate_email(email: &str) -> CoreErrorResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CoreError::validation("email", "Email is required"));
        }

        if !Self::looks_like_email(email) {
            return Err(CoreError::validation(
                "email",
                "Please enter a valid email address",
            ));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_password(password: &str) -> CoreErrorResult<()> {
        if password.is_empty() {
            return Err(CoreError::validation("password", "Password is required"));
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CoreError::validation(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_full_name(full_name: &str) -> CoreErrorResult<()> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(CoreError::validation("full_name", "Full name is required"));
        }

        if full_name.chars().count() < MIN_FULL_NAME_LENGTH {
            return Err(CoreError::validation(
                "full_name",
                format!("Full name must be at least {MIN_FULL_NAME_LENGTH} characters"),
            ));
        }

        Ok(())
    }

    /// An empty key is accepted (it means "leave unchanged").
    #[track_caller]
    pub fn validate_api_key(api_key: &str) -> CoreErrorResult<()> {
        let api_key = api_key.trim();
        if !api_key.is_empty() && api_key.chars().count() < MIN_API_KEY_LENGTH {
            return Err(CoreError::validation(
                "grok_api_key",
                "API key appears to be too short",
            ));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_sign_in(email: &str, password: &str) -> CoreErrorResult<()> {
        Self::validate_email(email)?;
        Self::validate_password(password)
    }

    #[track_caller]
    pub fn validate_registration(
        email: &str,
        password: &str,
        confirm_password: &str,
        full_name: &str,
    ) -> CoreErrorResult<()> {
        Self::validate_full_name(full_name)?;
        Self::validate_email(email)?;
        Self::validate_password(password)?;

        if confirm_password.is_empty() {
            return Err(CoreError::validation(
                "confirm_password",
                "Please confirm your password",
            ));
        }
        if confirm_password != password {
            return Err(CoreError::validation(
                "confirm_password",
                "Passwords do not match",
            ));
        }

        Ok(())
    }

    // local@domain.tld with no whitespace and a single '@'
    fn looks_like_email(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }

        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    }
}
