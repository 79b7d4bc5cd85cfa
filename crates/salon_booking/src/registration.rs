// --- File: crates/salon_booking/src/registration.rs ---
use salon_common::models::RegisterRequest;
use std::fmt;
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Digit bounds of an optional phone number; 15 is the E.164 maximum.
pub const MIN_PHONE_DIGITS: usize = 8;
pub const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
        };
        f.write_str(name)
    }
}

/// A problem with one field of the registration form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(Field),

    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("phone must hold {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits")]
    InvalidPhone,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required(field) => *field,
            ValidationError::PasswordTooShort => Field::Password,
            ValidationError::PasswordMismatch => Field::ConfirmPassword,
            ValidationError::InvalidPhone => Field::Phone,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Checks the form locally; every problem is reported, not just the first.
    pub fn validate(&self) -> Result<RegisterRequest, Vec<ValidationError>> {
        let mut errors = Vec::new();
        for (field, value) in [
            (Field::FirstName, &self.first_name),
            (Field::LastName, &self.last_name),
            (Field::Email, &self.email),
            (Field::Password, &self.password),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::Required(field));
            }
        }
        if !self.password.is_empty() && self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            errors.push(ValidationError::PasswordMismatch);
        }
        let phone = self.phone.trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.push(ValidationError::InvalidPhone);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
        })
    }
}

/// Digits with the usual separators, e.g. `06 12 34 56 78` or `+33 6.12.34.56.78`.
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let separators_only = phone.chars().enumerate().all(|(i, c)| {
        c.is_ascii_digit() || matches!(c, ' ' | '.' | '-' | '(' | ')') || (c == '+' && i == 0)
    });
    separators_only && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Joins per-field errors into one line.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
