//! LookupWordHandler - Defines a word from the course being viewed.

use std::sync::Arc;
use thiserror::Error;

use crate::application::StudioController;
use crate::domain::course::WordInfo;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{GenerationError, WordLookup};

/// Command to look up a word.
#[derive(Debug, Clone)]
pub struct LookupWordCommand {
    pub word: String,
    /// Defaults to the loaded course's language.
    pub language: Option<String>,
    /// Sentence the word appeared in.
    pub context: Option<String>,
}

impl LookupWordCommand {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            language: None,
            context: None,
        }
    }

    pub fn in_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum LookupWordError {
    #[error("No language given and no course is loaded")]
    NoLanguage,

    #[error(transparent)]
    Lookup(#[from] GenerationError),
}

impl From<LookupWordError> for DomainError {
    fn from(err: LookupWordError) -> Self {
        match err {
            LookupWordError::NoLanguage => {
                DomainError::validation("language", err.to_string())
            }
            LookupWordError::Lookup(e) => e.into(),
        }
    }
}

/// Handler for word lookups.
pub struct LookupWordHandler {
    lookup: Arc<dyn WordLookup>,
    controller: Arc<StudioController>,
}

impl LookupWordHandler {
    pub fn new(lookup: Arc<dyn WordLookup>, controller: Arc<StudioController>) -> Self {
        Self { lookup, controller }
    }

    pub async fn handle(&self, cmd: LookupWordCommand) -> Result<WordInfo, LookupWordError> {
        let language = match cmd.language {
            Some(language) => language,
            None => self
                .controller
                .course()
                .await
                .map(|course| course.language.clone())
                .ok_or(LookupWordError::NoLanguage)?,
        };

        Ok(self
            .lookup
            .lookup(&cmd.word, &language, cmd.context.as_deref())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::generation::{LlmCourseGenerator, LlmWordLookup};
    use crate::adapters::validation::JsonCourseValidator;
    use crate::domain::course::{CourseData, Quiz, QuizQuestion};
    use crate::ports::GenerationErrorKind;

    fn setup(provider: MockAIProvider) -> (LookupWordHandler, Arc<StudioController>) {
        let provider = Arc::new(provider);
        let generator =
            LlmCourseGenerator::new(provider.clone(), Arc::new(JsonCourseValidator::new()));
        let controller = Arc::new(StudioController::new(Arc::new(generator)));
        let lookup = Arc::new(LlmWordLookup::new(provider));
        let handler = LookupWordHandler::new(lookup, controller.clone());
        (handler, controller)
    }

    #[tokio::test]
    async fn uses_loaded_course_language() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"definition": "Saludo informal.", "translation": "hi"}"#);
        let (handler, controller) = setup(provider.clone());
        controller
            .load_course(CourseData {
                title: "Spanish".into(),
                language: "Spanish".into(),
                theory: None,
                dialogues: vec![],
                quiz: Quiz::new(
                    "Quiz",
                    vec![QuizQuestion::new("?", vec!["a".into(), "b".into()], 1, "")],
                ),
                flashcards: vec![],
            })
            .await;

        let info = handler.handle(LookupWordCommand::new("hola")).await.unwrap();

        assert_eq!(info.translation, "hi");
        assert!(provider.get_calls()[0].messages[0].content.contains("Language: Spanish"));
    }

    #[tokio::test]
    async fn explicit_language_needs_no_course() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"definition": "Brot.", "translation": "bread"}"#);
        let (handler, _) = setup(provider);

        let info = handler
            .handle(
                LookupWordCommand::new("Brot")
                    .in_language("German")
                    .with_context("Ich esse Brot."),
            )
            .await
            .unwrap();
        assert_eq!(info.translation, "bread");
    }

    #[tokio::test]
    async fn no_language_and_no_course_fails() {
        let (handler, _) = setup(MockAIProvider::new());
        let err = handler.handle(LookupWordCommand::new("hola")).await.unwrap_err();
        assert!(matches!(err, LookupWordError::NoLanguage));
        assert_eq!(DomainError::from(err).code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn empty_word_is_lookup_error() {
        let (handler, _) = setup(MockAIProvider::new());
        let err = handler
            .handle(LookupWordCommand::new(" ").in_language("Spanish"))
            .await
            .unwrap_err();
        match err {
            LookupWordError::Lookup(ref e) => {
                assert_eq!(e.kind(), GenerationErrorKind::EmptyInput)
            }
            ref other => panic!("unexpected {:?}", other),
        }
        assert_eq!(DomainError::from(err).code, ErrorCode::EmptyInput);
    }
}
