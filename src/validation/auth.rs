use crate::error::AppError;

pub fn validate_register_request(name: &str, email: &str, password: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }

    if email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    if !email.contains('@') || !email.contains('.') {
        return Err(AppError::validation("Invalid email format"));
    }

    if super::rules::validate_password_strength(password).is_err() {
        return Err(AppError::validation(
            "Password must be at least 8 characters and mix upper case, lower case, digits or symbols",
        ));
    }

    Ok(())
}

pub fn validate_login_request(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    if password.trim().is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    Ok(())
}
