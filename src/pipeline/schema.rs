//! Member-create body parsing and schema validation.
//!
//! Unlike the authorizer and scope checks this reports every field violation
//! at once, in field order (`userId`, `email`, `fullName`).
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::error::AppError;
use crate::models::MemberCreateRequest;

pub const FULL_NAME_MAX_LEN: usize = 70;

/// Why a request body could not be read as text.
///
/// Carried into the pipeline as data so that it is reported after the scope
/// check, like any other body problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyError {
    NotUtf8,
    TooLarge,
    Unreadable,
}

impl From<BodyError> for AppError {
    fn from(e: BodyError) -> Self {
        match e {
            BodyError::TooLarge => AppError::PayloadTooLarge,
            BodyError::NotUtf8 | BodyError::Unreadable => AppError::MalformedBody,
        }
    }
}

/// Parses a raw request body. A blank body counts as `{}`.
pub fn parse_body(body: &str) -> Result<Value, AppError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, "request body is not valid JSON");
        AppError::MalformedBody
    })
}

/// Validates and normalizes an untrusted member-create payload.
///
/// Unknown properties are dropped; an empty `fullName` becomes `None`.
pub fn validate_member(raw: &Value) -> Result<MemberCreateRequest, AppError> {
    let Some(fields) = raw.as_object() else {
        return Err(AppError::InvalidRequestData {
            violations: vec!["\"value\" must be of type object".to_string()],
        });
    };

    let mut violations = Vec::new();

    let user_id = required_string(fields, "userId", &mut violations);

    let email = match required_string(fields, "email", &mut violations) {
        Some(email) if !is_email(&email) => {
            violations.push("\"email\" must be a valid email".to_string());
            None
        }
        other => other,
    };

    let full_name = optional_string(fields, "fullName", &mut violations);
    if let Some(name) = &full_name
        && name.encode_utf16().count() > FULL_NAME_MAX_LEN
    {
        violations.push(format!(
            "\"fullName\" length must be less than or equal to {FULL_NAME_MAX_LEN} characters long"
        ));
    }

    match (user_id, email) {
        (Some(user_id), Some(email)) if violations.is_empty() => Ok(MemberCreateRequest {
            user_id,
            email,
            full_name,
        }),
        _ => Err(AppError::InvalidRequestData { violations }),
    }
}

fn required_string(
    fields: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<String>,
) -> Option<String> {
    match fields.get(name) {
        None => {
            violations.push(format!("\"{name}\" is required"));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(format!("\"{name}\" is not allowed to be empty"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(format!("\"{name}\" must be a string"));
            None
        }
    }
}

fn optional_string(
    fields: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<String>,
) -> Option<String> {
    match fields.get(name) {
        None => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(format!("\"{name}\" must be a string"));
            None
        }
    }
}

// Any TLD is accepted, but the domain needs at least two labels.
fn is_email(value: &str) -> bool {
    value.validate_email()
        && value
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'))
}
