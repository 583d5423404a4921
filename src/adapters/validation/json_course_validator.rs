//! JSON Course Validator - Implementation of CourseSchemaValidator.
//!
//! Walks a parsed model reply by hand and records every problem it finds,
//! so one failed generation reports all of them in the logs at once.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::domain::course::MIN_OPTIONS;
use crate::ports::{CourseSchemaValidator, SchemaValidationError};

/// Response schema sent to providers that can enforce one.
static COURSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("schemas/course.json"))
        .unwrap_or_else(|e| panic!("Failed to parse course schema: {}", e))
});

type Object = Map<String, Value>;

/// Manual validator for course documents.
///
/// `dialogues` and `flashcards` may be absent and are then treated as
/// empty; every other required field must be present. Titles, the
/// language, theory content, questions and flashcard fronts must also be
/// non-blank, matching what `CourseData::validate` accepts on import.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCourseValidator;

impl JsonCourseValidator {
    pub fn new() -> Self {
        Self
    }

    fn validate_course(&self, course: &Value, errors: &mut Vec<SchemaValidationError>) {
        let Some(obj) = Self::object(course, "root", errors) else {
            return;
        };

        Self::text(obj, "title", "", errors);
        Self::text(obj, "language", "", errors);

        if let Some(theory) = obj.get("theory").filter(|v| !v.is_null()) {
            if let Some(theory) = Self::object(theory, "theory", errors) {
                Self::string(theory, "title", "theory", errors);
                Self::text(theory, "content", "theory", errors);
            }
        }

        if let Some(dialogues) = Self::optional_array(obj, "dialogues", "", errors) {
            for (i, dialogue) in dialogues.iter().enumerate() {
                self.validate_dialogue(dialogue, &format!("dialogues[{}]", i), errors);
            }
        }

        match obj.get("quiz") {
            Some(quiz) => self.validate_quiz(quiz, errors),
            None => errors.push(SchemaValidationError::MissingRequired {
                field: "quiz".to_string(),
            }),
        }

        if let Some(cards) = Self::optional_array(obj, "flashcards", "", errors) {
            for (i, card) in cards.iter().enumerate() {
                let path = format!("flashcards[{}]", i);
                if let Some(card) = Self::object(card, &path, errors) {
                    Self::text(card, "front", &path, errors);
                    Self::string(card, "back", &path, errors);
                }
            }
        }
    }

    fn validate_dialogue(&self, value: &Value, path: &str, errors: &mut Vec<SchemaValidationError>) {
        let Some(obj) = Self::object(value, path, errors) else {
            return;
        };

        Self::text(obj, "title", path, errors);

        let mut participants = HashSet::new();
        let participants_path = Self::join(path, "participants");
        if let Some(names) = Self::array(obj, "participants", path, errors) {
            for (i, name) in names.iter().enumerate() {
                match name.as_str() {
                    Some(name) => {
                        if !participants.insert(name) {
                            errors.push(SchemaValidationError::Duplicate {
                                field: participants_path.clone(),
                                value: name.to_string(),
                            });
                        }
                    }
                    None => errors.push(SchemaValidationError::InvalidType {
                        field: format!("{}[{}]", participants_path, i),
                        expected: "string".to_string(),
                        actual: Self::type_name(name),
                    }),
                }
            }
        }

        if let Some(lines) = Self::array(obj, "lines", path, errors) {
            for (i, line) in lines.iter().enumerate() {
                let line_path = format!("{}.lines[{}]", path, i);
                let Some(line) = Self::object(line, &line_path, errors) else {
                    continue;
                };
                Self::string(line, "line", &line_path, errors);
                if let Some(speaker) = Self::string(line, "speaker", &line_path, errors) {
                    if !participants.contains(speaker) {
                        errors.push(SchemaValidationError::UnknownSpeaker {
                            field: format!("{}.speaker", line_path),
                            speaker: speaker.to_string(),
                        });
                    }
                }
            }
        }
    }

    fn validate_quiz(&self, value: &Value, errors: &mut Vec<SchemaValidationError>) {
        let Some(quiz) = Self::object(value, "quiz", errors) else {
            return;
        };

        Self::text(quiz, "title", "quiz", errors);

        let Some(questions) = Self::array(quiz, "questions", "quiz", errors) else {
            return;
        };
        if questions.is_empty() {
            errors.push(SchemaValidationError::ArrayTooShort {
                field: "quiz.questions".to_string(),
                min: 1,
                actual: 0,
            });
        }

        for (i, question) in questions.iter().enumerate() {
            let path = format!("quiz.questions[{}]", i);
            let Some(question) = Self::object(question, &path, errors) else {
                continue;
            };
            Self::text(question, "question", &path, errors);
            Self::string(question, "explanation", &path, errors);

            let option_count = Self::array(question, "options", &path, errors).map(|options| {
                for (j, option) in options.iter().enumerate() {
                    if !option.is_string() {
                        errors.push(SchemaValidationError::InvalidType {
                            field: format!("{}.options[{}]", path, j),
                            expected: "string".to_string(),
                            actual: Self::type_name(option),
                        });
                    }
                }
                if options.len() < MIN_OPTIONS {
                    errors.push(SchemaValidationError::ArrayTooShort {
                        field: format!("{}.options", path),
                        min: MIN_OPTIONS,
                        actual: options.len(),
                    });
                }
                options.len()
            });

            self.validate_answer_index(question, &path, option_count, errors);
        }
    }

    fn validate_answer_index(
        &self,
        question: &Object,
        path: &str,
        option_count: Option<usize>,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        let field = Self::join(path, "correctAnswerIndex");
        let Some(value) = question.get("correctAnswerIndex") else {
            errors.push(SchemaValidationError::MissingRequired { field });
            return;
        };

        let Some(index) = value.as_i64() else {
            errors.push(SchemaValidationError::InvalidType {
                field,
                expected: "integer".to_string(),
                actual: Self::type_name(value),
            });
            return;
        };

        // Bounds are only meaningful once the option list itself is usable.
        let Some(count) = option_count.filter(|count| *count > 0) else {
            return;
        };
        if index < 0 || index >= count as i64 {
            errors.push(SchemaValidationError::OutOfRange {
                field,
                value: index.to_string(),
                min: "0".to_string(),
                max: (count - 1).to_string(),
            });
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn join(parent: &str, field: &str) -> String {
        if parent.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", parent, field)
        }
    }

    fn object<'a>(
        value: &'a Value,
        path: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) -> Option<&'a Object> {
        let obj = value.as_object();
        if obj.is_none() {
            errors.push(SchemaValidationError::InvalidType {
                field: path.to_string(),
                expected: "object".to_string(),
                actual: Self::type_name(value),
            });
        }
        obj
    }

    fn string<'a>(
        obj: &'a Object,
        field: &str,
        parent: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) -> Option<&'a str> {
        let path = Self::join(parent, field);
        match obj.get(field) {
            None | Some(Value::Null) => {
                errors.push(SchemaValidationError::MissingRequired { field: path });
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                errors.push(SchemaValidationError::InvalidType {
                    field: path,
                    expected: "string".to_string(),
                    actual: Self::type_name(other),
                });
                None
            }
        }
    }

    /// A required string that must not be blank.
    fn text<'a>(
        obj: &'a Object,
        field: &str,
        parent: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) -> Option<&'a str> {
        let value = Self::string(obj, field, parent, errors)?;
        if value.trim().is_empty() {
            errors.push(SchemaValidationError::EmptyField {
                field: Self::join(parent, field),
            });
            return None;
        }
        Some(value)
    }

    fn array<'a>(
        obj: &'a Object,
        field: &str,
        parent: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) -> Option<&'a Vec<Value>> {
        if !obj.contains_key(field) {
            errors.push(SchemaValidationError::MissingRequired {
                field: Self::join(parent, field),
            });
            return None;
        }
        Self::optional_array(obj, field, parent, errors)
    }

    fn optional_array<'a>(
        obj: &'a Object,
        field: &str,
        parent: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) -> Option<&'a Vec<Value>> {
        match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items),
            Some(other) => {
                errors.push(SchemaValidationError::InvalidType {
                    field: Self::join(parent, field),
                    expected: "array".to_string(),
                    actual: Self::type_name(other),
                });
                None
            }
        }
    }

    fn type_name(value: &Value) -> String {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
        .to_string()
    }

    fn collect_errors(mut errors: Vec<SchemaValidationError>) -> Result<(), SchemaValidationError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(SchemaValidationError::Multiple(errors)),
        }
    }
}

impl CourseSchemaValidator for JsonCourseValidator {
    fn validate(&self, course: &Value) -> Result<(), SchemaValidationError> {
        let mut errors = Vec::new();
        self.validate_course(course, &mut errors);
        Self::collect_errors(errors)
    }

    fn response_schema(&self) -> &Value {
        &COURSE_SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> JsonCourseValidator {
        JsonCourseValidator::new()
    }

    fn valid_course() -> Value {
        json!({
            "title": "Beginner Spanish: Travel",
            "language": "Spanish",
            "theory": { "title": "Polite requests", "content": "Add 'por favor'." },
            "dialogues": [{
                "title": "Buying a ticket",
                "participants": ["Ana", "Clerk"],
                "lines": [
                    { "speaker": "Ana", "line": "Un billete a Madrid, por favor." },
                    { "speaker": "Clerk", "line": "Son veinte euros." }
                ]
            }],
            "quiz": {
                "title": "Check yourself",
                "questions": [{
                    "question": "What does 'billete' mean?",
                    "options": ["ticket", "bill", "train"],
                    "correctAnswerIndex": 0,
                    "explanation": "'Billete' is a ticket."
                }]
            },
            "flashcards": [{ "front": "el andén", "back": "the platform" }]
        })
    }

    #[test]
    fn valid_course_passes() {
        assert!(validator().validate(&valid_course()).is_ok());
    }

    #[test]
    fn missing_optional_sections_pass() {
        let mut course = valid_course();
        let obj = course.as_object_mut().unwrap();
        obj.remove("theory");
        obj.remove("dialogues");
        obj.remove("flashcards");
        assert!(validator().validate(&course).is_ok());
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = validator().validate(&json!(["not", "a", "course"])).unwrap_err();
        assert_eq!(
            err,
            SchemaValidationError::InvalidType {
                field: "root".into(),
                expected: "object".into(),
                actual: "array".into(),
            }
        );
    }

    #[test]
    fn missing_title_and_language_are_both_reported() {
        let mut course = valid_course();
        let obj = course.as_object_mut().unwrap();
        obj.remove("title");
        obj.remove("language");

        let err = validator().validate(&course).unwrap_err();
        assert_eq!(err.error_count(), 2);
        assert_eq!(err.to_client_message(), "Missing required field: title");
    }

    #[test]
    fn missing_quiz_is_rejected() {
        let mut course = valid_course();
        course.as_object_mut().unwrap().remove("quiz");
        let err = validator().validate(&course).unwrap_err();
        assert_eq!(
            err,
            SchemaValidationError::MissingRequired {
                field: "quiz".into()
            }
        );
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let mut course = valid_course();
        course["quiz"]["questions"] = json!([]);
        let err = validator().validate(&course).unwrap_err();
        assert!(matches!(err, SchemaValidationError::ArrayTooShort { min: 1, actual: 0, .. }));
    }

    #[test]
    fn answer_index_past_options_is_rejected() {
        let mut course = valid_course();
        course["quiz"]["questions"][0]["correctAnswerIndex"] = json!(3);
        let err = validator().validate(&course).unwrap_err();
        assert_eq!(
            err.to_client_message(),
            "Field 'quiz.questions[0].correctAnswerIndex' must be between 0 and 2"
        );
    }

    #[test]
    fn negative_answer_index_is_rejected() {
        let mut course = valid_course();
        course["quiz"]["questions"][0]["correctAnswerIndex"] = json!(-1);
        assert!(matches!(
            validator().validate(&course).unwrap_err(),
            SchemaValidationError::OutOfRange { .. }
        ));
    }

    #[test]
    fn fractional_answer_index_is_a_type_error() {
        let mut course = valid_course();
        course["quiz"]["questions"][0]["correctAnswerIndex"] = json!(1.5);
        let err = validator().validate(&course).unwrap_err();
        assert!(matches!(
            err,
            SchemaValidationError::InvalidType { ref expected, .. } if expected == "integer"
        ));
    }

    #[test]
    fn single_option_question_is_rejected() {
        let mut course = valid_course();
        course["quiz"]["questions"][0]["options"] = json!(["ticket"]);
        course["quiz"]["questions"][0]["correctAnswerIndex"] = json!(0);
        assert!(matches!(
            validator().validate(&course).unwrap_err(),
            SchemaValidationError::ArrayTooShort { min: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn unknown_speaker_is_reported() {
        let mut course = valid_course();
        course["dialogues"][0]["lines"][1]["speaker"] = json!("Conductor");
        let err = validator().validate(&course).unwrap_err();
        assert_eq!(
            err,
            SchemaValidationError::UnknownSpeaker {
                field: "dialogues[0].lines[1].speaker".into(),
                speaker: "Conductor".into(),
            }
        );
    }

    #[test]
    fn duplicate_participant_is_reported() {
        let mut course = valid_course();
        course["dialogues"][0]["participants"] = json!(["Ana", "Clerk", "Ana"]);
        assert!(matches!(
            validator().validate(&course).unwrap_err(),
            SchemaValidationError::Duplicate { .. }
        ));
    }

    #[test]
    fn blank_quiz_title_is_rejected() {
        let mut course = valid_course();
        course["quiz"]["title"] = json!("   ");
        assert_eq!(
            validator().validate(&course).unwrap_err(),
            SchemaValidationError::EmptyField {
                field: "quiz.title".into()
            }
        );
    }

    #[test]
    fn every_blank_required_text_is_reported() {
        let mut course = valid_course();
        course["title"] = json!("");
        course["language"] = json!(" ");
        course["theory"]["content"] = json!("\n");
        course["dialogues"][0]["title"] = json!("");
        course["quiz"]["questions"][0]["question"] = json!("\t");
        course["flashcards"][0]["front"] = json!("");

        let err = validator().validate(&course).unwrap_err();
        assert_eq!(err.error_count(), 6);
        let SchemaValidationError::Multiple(errors) = err else {
            panic!("expected several errors");
        };
        assert!(errors.contains(&SchemaValidationError::EmptyField {
            field: "flashcards[0].front".into()
        }));
        assert!(errors.contains(&SchemaValidationError::EmptyField {
            field: "dialogues[0].title".into()
        }));
    }

    #[test]
    fn blank_optional_text_is_allowed() {
        let mut course = valid_course();
        course["theory"]["title"] = json!("");
        course["flashcards"][0]["back"] = json!("");
        course["quiz"]["questions"][0]["explanation"] = json!("");
        assert!(validator().validate(&course).is_ok());
    }

    #[test]
    fn flashcards_must_be_an_array() {
        let mut course = valid_course();
        course["flashcards"] = json!({"front": "x"});
        assert!(matches!(
            validator().validate(&course).unwrap_err(),
            SchemaValidationError::InvalidType { ref field, .. } if field == "flashcards"
        ));
    }

    #[test]
    fn response_schema_lists_required_fields() {
        let binding = validator();
        let schema = binding.response_schema();
        assert_eq!(schema["type"], "OBJECT");
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"quiz"));
        assert!(required.contains(&"language"));
        assert_eq!(
            schema["properties"]["quiz"]["properties"]["questions"]["items"]["properties"]
                ["correctAnswerIndex"]["type"],
            "INTEGER"
        );
    }
}
