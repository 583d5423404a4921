//! Schema Validator Port - Model output validation interface.
//!
//! The model is asked for a course but nothing guarantees the reply fits.
//! This port checks a parsed reply before it is turned into `CourseData`.

use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Port for validating course documents against the course schema.
///
/// # Contract
///
/// Implementations must:
/// - Report missing required fields and wrong types
/// - Reject blank text wherever `CourseData::validate` does
/// - Reject quizzes without questions and questions with fewer than two options
/// - Reject `correctAnswerIndex` values outside the option list
/// - Reject dialogue lines whose speaker is not a participant
/// - Expose the response schema sent to providers that can enforce it
pub trait CourseSchemaValidator: Send + Sync {
    /// Validate a course document.
    ///
    /// Returns `Ok(())` if valid, `Err` with every problem found if not.
    fn validate(&self, course: &Value) -> Result<(), SchemaValidationError>;

    /// The response schema describing a course.
    fn response_schema(&self) -> &Value;
}

/// Errors that can occur during schema validation.
#[derive(Debug, Clone, Error)]
pub enum SchemaValidationError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Array too short for field {field}: minimum {min}, got {actual}")]
    ArrayTooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("Value out of range for field {field}: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Unknown speaker in {field}: '{speaker}' is not a participant")]
    UnknownSpeaker { field: String, speaker: String },

    #[error("Duplicate value in {field}: '{value}'")]
    Duplicate { field: String, value: String },

    #[error("Empty value for field {field}")]
    EmptyField { field: String },

    #[error("Invalid value for field {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Validation errors: {0:?}")]
    Multiple(Vec<SchemaValidationError>),
}

impl SchemaValidationError {
    /// Convert to a short message for the error screen.
    pub fn to_client_message(&self) -> String {
        match self {
            SchemaValidationError::MissingRequired { field } => {
                format!("Missing required field: {}", field)
            }
            SchemaValidationError::InvalidType { field, expected, .. } => {
                format!("Invalid type for field '{}': expected {}", field, expected)
            }
            SchemaValidationError::ArrayTooShort { field, min, .. } => {
                format!("Field '{}' requires at least {} items", field, min)
            }
            SchemaValidationError::OutOfRange { field, min, max, .. } => {
                format!("Field '{}' must be between {} and {}", field, min, max)
            }
            SchemaValidationError::UnknownSpeaker { field, speaker } => {
                format!("Speaker '{}' in '{}' is not a dialogue participant", speaker, field)
            }
            SchemaValidationError::Duplicate { field, value } => {
                format!("Field '{}' lists '{}' more than once", field, value)
            }
            SchemaValidationError::EmptyField { field } => {
                format!("Field '{}' must not be blank", field)
            }
            SchemaValidationError::InvalidValue { field, reason } => {
                format!("Field '{}' is invalid: {}", field, reason)
            }
            SchemaValidationError::Multiple(errors) => errors
                .first()
                .map(|e| e.to_client_message())
                .unwrap_or_else(|| "Validation failed".to_string()),
        }
    }

    /// Get the count of validation errors.
    pub fn error_count(&self) -> usize {
        match self {
            SchemaValidationError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }
}

/// Lifts a domain invariant failure found after deserializing a reply.
impl From<ValidationError> for SchemaValidationError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { field } => SchemaValidationError::EmptyField { field },
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => SchemaValidationError::OutOfRange {
                field,
                value: actual.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            },
            ValidationError::InvalidFormat { field, reason } => {
                SchemaValidationError::InvalidValue { field, reason }
            }
            ValidationError::Duplicate { field, value } => {
                SchemaValidationError::Duplicate { field, value }
            }
        }
    }
}

impl PartialEq for SchemaValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
