//! Common validation utilities
//!
//! Every check returns `Err(ApiError)` of the validation kind so callers can
//! simply `?` them inside services and handlers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::types::pagination::MAX_LIMIT;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("valid username regex"));

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid script regex")
});

static IFRAME_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe\s*>").expect("valid iframe regex")
});

static STRAY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?\s*(?:script|iframe)\b[^>]*>").expect("valid tag regex"));

static JAVASCRIPT_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript\s*:").expect("valid uri regex"));

static INLINE_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(<[^>]*?)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#)
        .expect("valid handler regex")
});

/// One failed field, as reported in `details.errors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Inclusive length bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: Option<usize>,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }
}

/// Report every required field that is absent, null or blank
pub fn require_fields(body: &Value, fields: &[&str]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| match body.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(
        ApiError::validation(format!("Missing required fields: {}", missing.join(", ")))
            .with_detail("missingFields", &missing),
    )
}

pub fn require_email(email: &str) -> Result<(), ApiError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ApiError::validation("Invalid email format").with_detail("field", "email"))
    }
}

pub fn require_username(username: &str) -> Result<(), ApiError> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        Err(ApiError::validation(
            "Username must be 3-30 characters and contain only letters, numbers, and underscores",
        )
        .with_detail("field", "username"))
    }
}

/// Checks run in order and the first failure is reported
pub fn require_password_strength(password: &str) -> Result<(), ApiError> {
    let failure = if password.chars().count() < 8 {
        Some("Password must be at least 8 characters long")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Password must contain at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain at least one uppercase letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least one number")
    } else {
        None
    };

    match failure {
        None => Ok(()),
        Some(message) => Err(ApiError::validation(message).with_detail("field", "password")),
    }
}

pub fn require_pagination(page: i64, limit: i64) -> Result<(), ApiError> {
    if page < 1 {
        return Err(ApiError::validation("Page must be greater than or equal to 1")
            .with_detail("field", "page"));
    }
    if limit < 1 || limit > i64::from(MAX_LIMIT) {
        return Err(
            ApiError::validation(format!("Limit must be between 1 and {MAX_LIMIT}"))
                .with_detail("field", "limit"),
        );
    }
    Ok(())
}

pub fn require_enum(value: &str, allowed: &[&str], field_name: &str) -> Result<(), ApiError> {
    if allowed.contains(&value) {
        return Ok(());
    }

    Err(ApiError::validation(format!(
        "Invalid {field_name}. Must be one of: {}",
        allowed.join(", ")
    ))
    .with_details(json!({ "field": field_name, "allowed": allowed })))
}

/// Length is counted in characters, not bytes
pub fn require_string_length(value: &str, name: &str, bounds: LengthBounds) -> Result<(), ApiError> {
    let len = value.chars().count();
    if len < bounds.min {
        return Err(ApiError::validation(format!(
            "{name} must be at least {} characters long",
            bounds.min
        ))
        .with_detail("field", name));
    }
    if let Some(max) = bounds.max {
        if len > max {
            return Err(ApiError::validation(format!(
                "{name} must be at most {max} characters long"
            ))
            .with_detail("field", name));
        }
    }
    Ok(())
}

pub fn require_array<T>(items: &[T], name: &str, bounds: LengthBounds) -> Result<(), ApiError> {
    if items.len() < bounds.min {
        return Err(ApiError::validation(format!(
            "{name} must contain at least {} items",
            bounds.min
        ))
        .with_detail("field", name));
    }
    if let Some(max) = bounds.max {
        if items.len() > max {
            return Err(
                ApiError::validation(format!("{name} must contain at most {max} items"))
                    .with_detail("field", name),
            );
        }
    }
    Ok(())
}

/// Latitude in [-90, 90], longitude in [-180, 180)
pub fn require_coordinates(latitude: f64, longitude: f64) -> Result<(), ApiError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::validation("Latitude must be between -90 and 90")
            .with_detail("field", "latitude"));
    }
    if !(-180.0..180.0).contains(&longitude) {
        return Err(ApiError::validation("Longitude must be between -180 and 180")
            .with_detail("field", "longitude"));
    }
    Ok(())
}

/// Best-effort removal of script-bearing markup from user text.
///
/// Not a security boundary: output is still untrusted and must be escaped
/// wherever it is rendered as HTML.
pub fn sanitize_html(input: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(input, "");
    let text = IFRAME_BLOCK.replace_all(&text, "");
    let text = STRAY_TAG.replace_all(&text, "");
    let text = JAVASCRIPT_URI.replace_all(&text, "");

    let mut text = text.into_owned();
    while INLINE_HANDLER.is_match(&text) {
        text = INLINE_HANDLER.replace_all(&text, "$1").into_owned();
    }

    text.trim().to_string()
}
