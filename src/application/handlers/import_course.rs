//! ImportCourseHandler - Loads an exported course into the studio.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::application::StudioController;
use crate::domain::course::CourseData;
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, ValidationError};
use crate::ports::{CourseDocument, CourseStorage, StorageError};

/// Where to import from.
#[derive(Debug, Clone)]
pub enum ImportSource {
    /// Any file holding an exported or bare course.
    File(PathBuf),
    /// A course previously saved to storage.
    Stored(CourseId),
}

/// Command to import a course.
#[derive(Debug, Clone)]
pub struct ImportCourseCommand {
    pub source: ImportSource,
}

/// Errors from importing a course.
#[derive(Debug, Error)]
pub enum ImportCourseError {
    #[error("Could not read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("The course file is invalid: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<ImportCourseError> for DomainError {
    fn from(err: ImportCourseError) -> Self {
        match err {
            ImportCourseError::Read { .. } => {
                DomainError::new(ErrorCode::StorageError, err.to_string())
            }
            ImportCourseError::Storage(e) => e.into(),
            ImportCourseError::Invalid(e) => DomainError {
                code: ErrorCode::InvalidCourse,
                ..DomainError::from(e)
            },
        }
    }
}

/// Handler for importing courses.
pub struct ImportCourseHandler {
    controller: Arc<StudioController>,
    storage: Arc<dyn CourseStorage>,
}

impl ImportCourseHandler {
    pub fn new(controller: Arc<StudioController>, storage: Arc<dyn CourseStorage>) -> Self {
        Self {
            controller,
            storage,
        }
    }

    pub async fn handle(&self, cmd: ImportCourseCommand) -> Result<CourseData, ImportCourseError> {
        // 1. Read
        let course = match cmd.source {
            ImportSource::File(path) => {
                let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
                    ImportCourseError::Read {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;
                CourseDocument::from_json(&text)?.into_course()
            }
            ImportSource::Stored(id) => self.storage.load(id).await?.course,
        };

        // 2. Validate
        course.validate()?;

        // 3. Show
        info!(title = %course.title, "Course imported");
        self.controller.load_course(course.clone()).await;

        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryCourseStorage;
    use crate::domain::course::{Dialogue, DialogueLine, Quiz, QuizQuestion};
    use crate::ports::{CourseGenerator, GenerationError, StoredCourse};
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct NoGenerator;

    #[async_trait]
    impl CourseGenerator for NoGenerator {
        async fn generate_from_structured_input(
            &self,
            _: &str,
        ) -> Result<CourseData, GenerationError> {
            Err(GenerationError::empty_input("file content"))
        }

        async fn generate_from_prompt(&self, _: &str) -> Result<CourseData, GenerationError> {
            Err(GenerationError::empty_input("prompt"))
        }
    }

    fn course() -> CourseData {
        CourseData {
            title: "Japanese".into(),
            language: "Japanese".into(),
            theory: None,
            dialogues: vec![Dialogue::new(
                "Greeting",
                vec!["Yuki".into(), "Ken".into()],
                vec![DialogueLine::new("Yuki", "こんにちは")],
            )],
            quiz: Quiz::new(
                "Quiz",
                vec![QuizQuestion::new("はい?", vec!["yes".into(), "no".into()], 0, "")],
            ),
            flashcards: vec![],
        }
    }

    fn handler() -> (ImportCourseHandler, Arc<StudioController>, Arc<InMemoryCourseStorage>) {
        let controller = Arc::new(StudioController::new(Arc::new(NoGenerator)));
        let storage = Arc::new(InMemoryCourseStorage::new());
        (
            ImportCourseHandler::new(controller.clone(), storage.clone()),
            controller,
            storage,
        )
    }

    fn file_command(path: PathBuf) -> ImportCourseCommand {
        ImportCourseCommand {
            source: ImportSource::File(path),
        }
    }

    #[tokio::test]
    async fn imports_exported_envelope() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("course.json");
        let envelope = serde_json::to_string(&StoredCourse::new(course())).unwrap();
        std::fs::write(&path, envelope).unwrap();

        let (handler, controller, _) = handler();
        let imported = handler.handle(file_command(path)).await.unwrap();

        assert_eq!(imported, course());
        assert_eq!(controller.course().await.unwrap().title, "Japanese");
    }

    #[tokio::test]
    async fn imports_bare_course() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bare.json");
        std::fs::write(&path, serde_json::to_string(&course()).unwrap()).unwrap();

        let (handler, _, _) = handler();
        assert_eq!(handler.handle(file_command(path)).await.unwrap(), course());
    }

    #[tokio::test]
    async fn imports_from_storage() {
        let (handler, controller, storage) = handler();
        let stored = storage.save(&course()).await.unwrap();

        handler
            .handle(ImportCourseCommand {
                source: ImportSource::Stored(stored.id),
            })
            .await
            .unwrap();

        assert!(controller.course().await.is_some());
    }

    #[tokio::test]
    async fn rejects_course_with_unknown_speaker() {
        let mut bad = course();
        bad.dialogues[0].lines.push(DialogueLine::new("Stranger", "..."));
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, serde_json::to_string(&bad).unwrap()).unwrap();

        let (handler, controller, _) = handler();
        let err = handler.handle(file_command(path)).await.unwrap_err();

        assert!(matches!(err, ImportCourseError::Invalid(_)));
        let err = DomainError::from(err);
        assert_eq!(err.code, ErrorCode::InvalidCourse);
        assert_eq!(
            err.details.get("field").map(String::as_str),
            Some("dialogues[0].lines[1].speaker")
        );
        assert!(controller.course().await.is_none());
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let (handler, _, _) = handler();
        let err = handler
            .handle(file_command(PathBuf::from("/definitely/not/here.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportCourseError::Read { .. }));
    }

    #[tokio::test]
    async fn unknown_stored_id_is_not_found() {
        let (handler, _, _) = handler();
        let err = handler
            .handle(ImportCourseCommand {
                source: ImportSource::Stored(CourseId::new()),
            })
            .await
            .unwrap_err();
        assert_eq!(DomainError::from(err).code, ErrorCode::CourseNotFound);
    }
}
