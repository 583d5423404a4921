//! Course module - the generated learning unit.
//!
//! A course is produced once (by generation or import) and never mutated
//! afterwards. Field names serialize in camelCase so exported courses keep
//! the shape users already have on disk.

mod course;
mod dialogue;
mod flashcard;
mod quiz;

pub use course::{CourseData, CourseSummary, Theory};
pub use dialogue::{Dialogue, DialogueLine};
pub use flashcard::{Flashcard, WordInfo};
pub use quiz::{Quiz, QuizQuestion, MIN_OPTIONS};
