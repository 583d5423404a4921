//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Hosted model providers (Gemini, OpenAI) and a mock
//! - `generation` - Course generation and word lookup on top of a provider
//! - `validation` - Course schema validation of model output
//! - `storage` - Course export and import
//! - `render` - Text rendering for the command line

pub mod ai;
pub mod generation;
pub mod render;
pub mod storage;
pub mod validation;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use generation::{GenerationSettings, LlmCourseGenerator, LlmWordLookup};
pub use render::TextRenderer;
pub use storage::{FileCourseStorage, InMemoryCourseStorage};
pub use validation::JsonCourseValidator;
