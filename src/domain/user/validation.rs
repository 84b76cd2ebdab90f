//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username contains invalid character: '{0}'. Only alphanumeric characters, underscores, and hyphens are allowed")]
    InvalidUsernameCharacter(char),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a username
///
/// Rules:
/// - Between 3 and 50 characters
/// - Only alphanumeric characters, underscores, and hyphens
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    for c in username.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(UserValidationError::InvalidUsernameCharacter(c));
        }
    }

    Ok(())
}

/// Validate a plaintext password before hashing
///
/// Rules:
/// - Between 8 and 128 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("user_42").is_ok());
        assert!(validate_username("jean-luc").is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(validate_username(""), Err(UserValidationError::EmptyUsername));
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab"),
            Err(UserValidationError::UsernameTooShort(3))
        );
    }

    #[test]
    fn test_username_too_long() {
        let long = "a".repeat(51);
        assert_eq!(
            validate_username(&long),
            Err(UserValidationError::UsernameTooLong(50))
        );
    }

    #[test]
    fn test_username_invalid_character() {
        assert_eq!(
            validate_username("al ice"),
            Err(UserValidationError::InvalidUsernameCharacter(' '))
        );
        assert_eq!(
            validate_username("alice!"),
            Err(UserValidationError::InvalidUsernameCharacter('!'))
        );
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("correct-horse").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("short"),
            Err(UserValidationError::PasswordTooShort(8))
        );
    }

    #[test]
    fn test_password_too_long() {
        let long = "p".repeat(129);
        assert_eq!(
            validate_password(&long),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }
}
