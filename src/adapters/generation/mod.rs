//! Generation adapters - LLM implementations of CourseGenerator and WordLookup.

mod llm_course_generator;
mod llm_word_lookup;
mod prompts;
mod reply;

pub use llm_course_generator::{GenerationSettings, LlmCourseGenerator};
pub use llm_word_lookup::LlmWordLookup;
