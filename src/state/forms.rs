//! Input validation run before any network call.

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_TEAM_NAME_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("username is required")]
    MissingUsername,
    #[error("password is required")]
    MissingPassword,
    #[error("username must be at least {} characters", MIN_USERNAME_LEN)]
    UsernameTooShort,
    #[error("username must be at most {} characters", MAX_USERNAME_LEN)]
    UsernameTooLong,
    #[error("username cannot contain spaces")]
    UsernameHasSpaces,
    #[error("password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("team name must be at least {} characters", MIN_TEAM_NAME_LEN)]
    TeamNameTooShort,
}

/// Login only requires both fields to be filled.
///
/// # Errors
///
/// Returns the first missing field.
pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::MissingUsername);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

/// Registration rules mirror what the backend enforces so most mistakes
/// are caught without a round trip.
///
/// # Errors
///
/// Returns the first rule the input breaks, checked in form order.
pub fn validate_registration(username: &str, password: &str, confirmation: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if len < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    if len > MAX_USERNAME_LEN {
        return Err(ValidationError::UsernameTooLong);
    }
    if username.contains(' ') {
        return Err(ValidationError::UsernameHasSpaces);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// # Errors
///
/// Returns [`ValidationError::TeamNameTooShort`] for names under three characters.
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_TEAM_NAME_LEN {
        return Err(ValidationError::TeamNameTooShort);
    }
    Ok(())
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
