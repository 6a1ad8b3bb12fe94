use std::borrow::Cow;

use validator::ValidationError;

pub const MIN_USERNAME_LENGTH: usize = 6;
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_username_present(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(validation_error("required", "Username is a required field"));
    }
    Ok(())
}

pub fn validate_password_present(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(validation_error("required", "Password is a required field"));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    validate_username_present(username)?;

    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(validation_error(
            "username_too_short",
            "Username must be at least 6 characters",
        ));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    validate_password_present(password)?;

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(validation_error(
            "password_too_short",
            "Password must be at least 6 characters",
        ));
    }

    Ok(())
}
