//! Registration, sign-in and profile name rules

use once_cell::sync::Lazy;
use regex::Regex;
use zeroize::Zeroizing;

use super::{Field, FieldError, ValidationErrors};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Passwords rejected even when they satisfy the character rules
pub const WEAK_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password1!",
    "password123",
    "password123!",
    "p@ssw0rd",
    "p@ssword1",
    "12345678",
    "123456789",
    "1234567890",
    "qwerty123",
    "qwerty123!",
    "abc12345",
    "abc123!@#",
    "admin123",
    "admin123!",
    "welcome1!",
    "letmein1!",
    "iloveyou1!",
];

static NAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ ]+$").expect("name pattern compiles")
});

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Raw sign-up form input
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub password_confirmation: Zeroizing<String>,
}

/// Sign-up form after all rules passed
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub full_name: String,
    pub email: String,
    pub password: Zeroizing<String>,
}

/// Raw sign-in form input
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: Zeroizing<String>,
}

/// Validate the sign-up form
pub fn validate_registration(
    form: &RegistrationForm,
) -> Result<ValidRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let full_name = errors.check(validate_full_name(&form.full_name));
    let email = errors.check(validate_email(&form.email));
    errors.check(validate_password(&form.password));
    errors.check(validate_confirmation(
        &form.password,
        &form.password_confirmation,
    ));

    match (full_name, email) {
        (Some(full_name), Some(email)) if errors.is_empty() => Ok(ValidRegistration {
            full_name,
            email,
            password: form.password.clone(),
        }),
        _ => Err(errors),
    }
}

/// Validate the sign-in form; only presence is checked, the backend decides
/// whether the credentials are right. Returns the trimmed e-mail.
pub fn validate_sign_in(form: &SignInForm) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let email = form.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new(Field::Email, "Email is required"));
    }
    if form.password.is_empty() {
        errors.push(FieldError::new(Field::Password, "Password is required"));
    }

    errors.into_result().map(|_| email.to_string())
}

/// Full name: first and last name, letters and single spaces only
pub fn validate_full_name(full_name: &str) -> Result<String, FieldError> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(Field::FullName, "Full name is required"));
    }
    if !NAME_CHARS.is_match(trimmed) {
        return Err(FieldError::new(
            Field::FullName,
            "Full name may contain only letters and spaces",
        ));
    }
    if trimmed.contains("  ") {
        return Err(FieldError::new(
            Field::FullName,
            "Full name cannot contain consecutive spaces",
        ));
    }
    if trimmed.split_whitespace().count() < 2 {
        return Err(FieldError::new(
            Field::FullName,
            "Please enter your first and last name",
        ));
    }
    Ok(trimmed.to_string())
}

/// E-mail: `local@domain.tld` shape
pub fn validate_email(email: &str) -> Result<String, FieldError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(Field::Email, "Email is required"));
    }
    if !EMAIL.is_match(trimmed) {
        return Err(FieldError::new(Field::Email, "Email address is not valid"));
    }
    Ok(trimmed.to_string())
}

/// Password strength rules, first failing rule wins
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    let fail = |message: String| Err(FieldError::new(Field::Password, message));

    if password.is_empty() {
        return fail("Password is required".into());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return fail(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    if !password.chars().any(char::is_alphabetic) {
        return fail("Password must contain a letter".into());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return fail("Password must contain a number".into());
    }
    if !password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        return fail("Password must contain a special character".into());
    }
    let lowered = password.to_lowercase();
    if WEAK_PASSWORDS.iter().any(|weak| *weak == lowered) {
        return fail("Password is too common, choose another one".into());
    }
    Ok(())
}

/// Confirmation must repeat the password exactly
pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), FieldError> {
    if confirmation.is_empty() {
        return Err(FieldError::new(
            Field::PasswordConfirmation,
            "Please confirm your password",
        ));
    }
    if password != confirmation {
        return Err(FieldError::new(
            Field::PasswordConfirmation,
            "Passwords do not match",
        ));
    }
    Ok(())
}
