//! Quiz and quiz question value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

/// A multiple-choice quiz closing a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Creates a quiz from its questions.
    pub fn new(title: impl Into<String>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            title: title.into(),
            questions,
        }
    }

    pub(crate) fn validate(&self, path: &str) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.title", path)));
        }
        if self.questions.is_empty() {
            return Err(ValidationError::empty_field(format!("{}.questions", path)));
        }
        for (i, question) in self.questions.iter().enumerate() {
            question.validate(&format!("{}.questions[{}]", path, i))?;
        }
        Ok(())
    }
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`; always `< options.len()` for validated courses.
    pub correct_answer_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// Creates a question.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer_index: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            options,
            correct_answer_index,
            explanation: explanation.into(),
        }
    }

    /// The text of the correct option, if the index is in bounds.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_answer_index)
            .map(String::as_str)
    }

    pub(crate) fn validate(&self, path: &str) -> Result<(), ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.question", path)));
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(ValidationError::out_of_range(
                format!("{}.options", path),
                MIN_OPTIONS as i64,
                i64::MAX,
                self.options.len() as i64,
            ));
        }
        if self.correct_answer_index >= self.options.len() {
            return Err(ValidationError::out_of_range(
                format!("{}.correctAnswerIndex", path),
                0,
                self.options.len() as i64 - 1,
                self.correct_answer_index as i64,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion::new(
            "How do you say 'thank you'?",
            vec!["Hola".into(), "Gracias".into(), "Adiós".into()],
            correct,
            "'Gracias' means thank you.",
        )
    }

    #[test]
    fn correct_option_follows_index() {
        assert_eq!(question(1).correct_option(), Some("Gracias"));
        assert_eq!(question(7).correct_option(), None);
    }

    #[test]
    fn validate_rejects_out_of_bounds_index() {
        let err = question(3).validate("quiz.questions[0]").unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { actual: 3, max: 2, .. }));
    }

    #[test]
    fn validate_rejects_single_option() {
        let q = QuizQuestion::new("Q", vec!["only".into()], 0, "");
        assert!(q.validate("q").is_err());
    }

    #[test]
    fn quiz_requires_questions() {
        let quiz = Quiz::new("Check", vec![]);
        assert_eq!(
            quiz.validate("quiz").unwrap_err(),
            ValidationError::empty_field("quiz.questions")
        );
    }

    #[test]
    fn serializes_correct_answer_index_in_camel_case() {
        let json = serde_json::to_value(question(1)).unwrap();
        assert_eq!(json["correctAnswerIndex"], 1);
    }
}
