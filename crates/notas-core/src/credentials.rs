//! Credential checks applied before talking to the auth endpoints.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Password confirmation is required")]
    MissingConfirmation,
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_FORMAT.is_match(email)
}

pub fn validate_login(email: &str, password: &str) -> Result<(), CredentialError> {
    if email.is_empty() {
        return Err(CredentialError::MissingEmail);
    }
    if password.is_empty() {
        return Err(CredentialError::MissingPassword);
    }
    if !is_valid_email(email) {
        return Err(CredentialError::InvalidEmail);
    }
    Ok(())
}

/// Checks run in order: presence, confirmation match, email format, password length.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), CredentialError> {
    if email.is_empty() {
        return Err(CredentialError::MissingEmail);
    }
    if password.is_empty() {
        return Err(CredentialError::MissingPassword);
    }
    if confirmation.is_empty() {
        return Err(CredentialError::MissingConfirmation);
    }
    if password != confirmation {
        return Err(CredentialError::PasswordMismatch);
    }
    if !is_valid_email(email) {
        return Err(CredentialError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn login_requires_both_fields_and_valid_email() {
        assert_eq!(validate_login("", "pw"), Err(CredentialError::MissingEmail));
        assert_eq!(
            validate_login("a@b.com", ""),
            Err(CredentialError::MissingPassword)
        );
        assert_eq!(
            validate_login("not-an-email", "pw"),
            Err(CredentialError::InvalidEmail)
        );
        assert_eq!(validate_login("a@b.com", "pw"), Ok(()));
    }

    #[test]
    fn registration_rules_apply_in_order() {
        assert_eq!(
            validate_registration("a@b.com", "password1", ""),
            Err(CredentialError::MissingConfirmation)
        );
        assert_eq!(
            validate_registration("bad", "password1", "password2"),
            Err(CredentialError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("bad", "password1", "password1"),
            Err(CredentialError::InvalidEmail)
        );
        assert_eq!(
            validate_registration("a@b.com", "short", "short"),
            Err(CredentialError::PasswordTooShort)
        );
        assert_eq!(
            validate_registration("a@b.com", "password1", "password1"),
            Ok(())
        );
    }

    #[test]
    fn password_too_short_message_names_minimum() {
        assert_eq!(
            CredentialError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters"
        );
    }
}
