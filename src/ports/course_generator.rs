//! Course Generator Port - Turns user input into a course.
//!
//! Two entry points mirror the two ways a user can start: uploading a JSON
//! document or typing a prompt. Each call resolves exactly once with a
//! whole course or an error; there are no partial results.

use async_trait::async_trait;
use thiserror::Error;

use super::{AIError, SchemaValidationError};
use crate::domain::course::CourseData;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for course generation.
#[async_trait]
pub trait CourseGenerator: Send + Sync {
    /// Generate a course from a JSON document that loosely resembles one.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if the content is blank
    /// - `Parse` if the content is not valid JSON
    /// - `InvalidCourse` if the model reply does not fit the course schema
    /// - `Service` if the model call fails
    async fn generate_from_structured_input(
        &self,
        file_content: &str,
    ) -> Result<CourseData, GenerationError>;

    /// Generate a course from a free-text description.
    ///
    /// # Errors
    ///
    /// Same as [`CourseGenerator::generate_from_structured_input`], except
    /// that prompts are never parsed locally.
    async fn generate_from_prompt(&self, prompt: &str) -> Result<CourseData, GenerationError>;
}

/// Coarse failure categories shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationErrorKind {
    /// Input or model output could not be read as a course.
    Parse,
    /// Nothing to generate from.
    EmptyInput,
    /// The model service failed.
    Service,
}

/// Errors from course generation.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("The {field} is empty. Please provide some content to generate a course from.")]
    EmptyInput { field: &'static str },

    #[error("The uploaded file is not valid JSON: {0}")]
    Parse(String),

    #[error("The generated course is invalid: {}", .0.to_client_message())]
    InvalidCourse(SchemaValidationError),

    #[error("Course generation failed: {0}")]
    Service(#[from] AIError),
}

impl GenerationError {
    /// Creates an empty input error.
    pub fn empty_input(field: &'static str) -> Self {
        Self::EmptyInput { field }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns the user-facing category of this error.
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            GenerationError::EmptyInput { .. } => GenerationErrorKind::EmptyInput,
            GenerationError::Parse(_) | GenerationError::InvalidCourse(_) => {
                GenerationErrorKind::Parse
            }
            GenerationError::Service(_) => GenerationErrorKind::Service,
        }
    }
}

impl From<SchemaValidationError> for GenerationError {
    fn from(err: SchemaValidationError) -> Self {
        GenerationError::InvalidCourse(err)
    }
}

impl From<GenerationError> for DomainError {
    fn from(err: GenerationError) -> Self {
        let code = match &err {
            GenerationError::EmptyInput { .. } => ErrorCode::EmptyInput,
            GenerationError::Parse(_) => ErrorCode::InvalidJson,
            GenerationError::InvalidCourse(_) => ErrorCode::InvalidCourse,
            GenerationError::Service(AIError::RateLimited { .. }) => ErrorCode::RateLimited,
            GenerationError::Service(_) => ErrorCode::AIProviderError,
        };
        DomainError::new(code, err.to_string())
    }
}
