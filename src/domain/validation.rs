//! Registration input validation.
//!
//! [`validate_registration`] is pure: it never touches storage. Every failing
//! field is reported, at most once per field, in form order.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::ranks;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Raw registration fields exactly as submitted. Absent and `null` fields are
/// both `None` and reported as missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub military_rank: Option<String>,
}

/// Normalized registration ready for hashing and storage.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub military_rank: String,
}

impl fmt::Debug for ValidRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidRegistration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("military_rank", &self.military_rank)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    MilitaryRank,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
            Self::MilitaryRank => "military_rank",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Non-empty set of per-field failures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("Invalid email regex defined in code")
    })
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email) && !email.contains("..")
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates and normalizes a registration form.
pub fn validate_registration(form: RegistrationForm) -> Result<ValidRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let password = form.password.unwrap_or_default();
    let confirm_password = form.confirm_password.unwrap_or_default();

    let name = form.name.as_deref().unwrap_or_default().trim().to_string();
    let name_len = name.chars().count();
    if name.is_empty() {
        errors.push(Field::Name, "Name is required");
    } else if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
        errors.push(
            Field::Name,
            format!("Name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
        );
    }

    let email = form.email.as_deref().unwrap_or_default().trim().to_string();
    if email.is_empty() {
        errors.push(Field::Email, "Email is required");
    } else if !is_valid_email(&email) {
        errors.push(Field::Email, "Invalid email address");
    }

    if password.trim().is_empty() {
        errors.push(Field::Password, "Password is required");
    } else if password.chars().count() < PASSWORD_MIN_CHARS {
        errors.push(
            Field::Password,
            format!("Password must be at least {PASSWORD_MIN_CHARS} characters"),
        );
    }

    if confirm_password.trim().is_empty() {
        errors.push(Field::ConfirmPassword, "Password confirmation is required");
    } else if confirm_password != password {
        errors.push(Field::ConfirmPassword, "Passwords do not match");
    }

    let rank = form.military_rank.as_deref().unwrap_or_default().trim();
    if rank.is_empty() {
        errors.push(Field::MilitaryRank, "Military rank is required");
    } else if !ranks::is_valid_rank(rank) {
        errors.push(Field::MilitaryRank, "Unknown military rank");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidRegistration {
        name,
        email,
        password,
        phone: blank_to_none(form.phone),
        address: blank_to_none(form.address),
        military_rank: rank.to_string(),
    })
}
