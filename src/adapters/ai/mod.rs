//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! - `GeminiProvider` - Google Gemini, with server-side response schemas
//! - `OpenAIProvider` - OpenAI chat completions in JSON mode
//! - `MockAIProvider` - Queued replies for tests and offline runs

mod gemini_provider;
mod http;
mod mock_provider;
mod openai_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
