//! Validation error types

use std::fmt;

use serde::Serialize;

/// Validation error for a single request field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent (or null)
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Integer outside its allowed range
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Amount that must be strictly positive
    NotPositive { field: &'static str },

    /// String doesn't match required format (e.g., email, date)
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum variant
    InvalidVariant {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    /// Body could not be decoded into the request shape at all
    MalformedBody { reason: String },
}

impl ValidationError {
    /// Name of the offending field (`body` for undecodable payloads).
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Empty { field }
            | Self::OutOfRange { field, .. }
            | Self::NotPositive { field }
            | Self::InvalidFormat { field, .. }
            | Self::InvalidVariant { field, .. } => field,
            Self::MalformedBody { .. } => "body",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::NotPositive { field } => write!(f, "{} must be a positive number", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant {
                field,
                value,
                expected,
            } => write!(
                f,
                "invalid {} value: '{}' (expected one of: {})",
                field,
                value,
                expected.join(", ")
            ),
            Self::MalformedBody { reason } => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// One entry of the `details` array in a 400 response
#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

/// All field errors found while validating one request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Keep the value on success, record the error otherwise.
    pub fn collect<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.push(err);
                None
            }
        }
    }

    /// Validate an optional field, recording the error if present but invalid.
    pub fn collect_optional<T, U>(
        &mut self,
        value: Option<T>,
        validate: impl FnOnce(T) -> Result<U, ValidationError>,
    ) -> Option<U> {
        value.and_then(|v| self.collect(validate(v)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Field-level detail for the response body.
    pub fn issues(&self) -> Vec<FieldIssue> {
        self.0
            .iter()
            .map(|e| FieldIssue {
                field: e.field(),
                message: e.to_string(),
            })
            .collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Unwrap a required field or report it missing.
pub fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}
