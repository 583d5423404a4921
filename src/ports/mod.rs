//! Ports - Interfaces between the application and the outside world.
//!
//! Each port is a trait; adapters in `crate::adapters` implement them.

mod ai_provider;
mod course_generator;
mod course_storage;
mod schema_validator;
mod word_lookup;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, RequestPurpose, ResponseFormat, TokenUsage,
};
pub use course_generator::{CourseGenerator, GenerationError, GenerationErrorKind};
pub use course_storage::{
    CourseDocument, CourseStorage, StorageError, StoredCourse, StoredCourseSummary,
};
pub use schema_validator::{CourseSchemaValidator, SchemaValidationError};
pub use word_lookup::WordLookup;
