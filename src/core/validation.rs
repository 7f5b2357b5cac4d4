//! Form validation errors and shared field checks

use std::collections::BTreeMap;
use thiserror::Error;

/// A problem with a single form field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
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

    pub fn unknown_field(field: &str) -> Self {
        Self::new(field, "unknown field")
    }
}

/// All field errors of one form submission, keyed by field name
///
/// Shown inline next to the offending fields; a draft that produces any of
/// these never reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: FieldError) {
        self.fields.entry(error.field).or_insert(error.message);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message for one field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Fold in another set; fields already present keep their message
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, message) in other.fields {
            self.fields.entry(field).or_insert(message);
        }
    }

    /// Drop the error for one field, if any
    pub fn clear(&mut self, field: &str) {
        self.fields.remove(field);
    }

    /// `Ok(value)` if nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(f, m)| format!("{}: {}", f, m)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Trim a required text field, recording an error when it is blank
pub fn required(errors: &mut ValidationErrors, field: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(FieldError::new(field, "is required"));
    }
    trimmed.to_string()
}

/// Trim an optional text field; blank becomes `None`
pub fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Required positive integer reference (city, contractor)
pub fn required_id(errors: &mut ValidationErrors, field: &str, value: Option<u64>) -> u64 {
    match value {
        Some(id) if id > 0 => id,
        _ => {
            errors.add(FieldError::new(field, "is required"));
            0
        }
    }
}

/// Parse a positive integer id from form input
pub fn parse_id(field: &str, value: &str) -> Result<Option<u64>, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<u64>()
        .map(Some)
        .map_err(|_| FieldError::new(field, format!("'{}' is not a valid id", value)))
}

/// Parse a coordinate from form input, checking its range
pub fn parse_coordinate(field: &str, value: &str, limit: f64) -> Result<Option<f64>, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let parsed: f64 = value
        .parse()
        .map_err(|_| FieldError::new(field, format!("'{}' is not a number", value)))?;
    if !(-limit..=limit).contains(&parsed) {
        return Err(FieldError::new(
            field,
            format!("must be between -{} and {}", limit, limit),
        ));
    }
    Ok(Some(parsed))
}
