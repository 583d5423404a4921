//! The course aggregate.

use serde::{Deserialize, Serialize};

use super::{Dialogue, Flashcard, Quiz};
use crate::domain::foundation::ValidationError;

/// Explanatory notes preceding the exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theory {
    pub title: String,
    pub content: String,
}

impl Theory {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A complete generated language course.
///
/// Produced by generation or import and never mutated afterwards; the
/// studio swaps whole instances instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseData {
    pub title: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theory: Option<Theory>,
    #[serde(default)]
    pub dialogues: Vec<Dialogue>,
    pub quiz: Quiz,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

/// Section counts of a course, used for logging and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub has_theory: bool,
    pub dialogues: usize,
    pub dialogue_lines: usize,
    pub questions: usize,
    pub flashcards: usize,
}

impl CourseData {
    /// Returns section counts for this course.
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            has_theory: self.theory.is_some(),
            dialogues: self.dialogues.len(),
            dialogue_lines: self.dialogues.iter().map(|d| d.lines.len()).sum(),
            questions: self.quiz.questions.len(),
            flashcards: self.flashcards.len(),
        }
    }

    /// Checks every course invariant, returning the first violation.
    ///
    /// Both generated and imported courses must pass this before they are
    /// shown.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if self.language.trim().is_empty() {
            return Err(ValidationError::empty_field("language"));
        }
        if let Some(theory) = &self.theory {
            if theory.content.trim().is_empty() {
                return Err(ValidationError::empty_field("theory.content"));
            }
        }
        for (i, dialogue) in self.dialogues.iter().enumerate() {
            dialogue.validate(&format!("dialogues[{}]", i))?;
        }
        self.quiz.validate("quiz")?;
        for (i, card) in self.flashcards.iter().enumerate() {
            if card.front.trim().is_empty() {
                return Err(ValidationError::empty_field(format!("flashcards[{}].front", i)));
            }
        }
        Ok(())
    }
}
