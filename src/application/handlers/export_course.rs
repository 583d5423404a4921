//! ExportCourseHandler - Saves the course currently shown in the studio.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::application::StudioController;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CourseStorage, StorageError, StoredCourseSummary};

/// Errors from exporting a course.
#[derive(Debug, Error)]
pub enum ExportCourseError {
    #[error("There is no course to export")]
    NoCourseLoaded,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ExportCourseError> for DomainError {
    fn from(err: ExportCourseError) -> Self {
        match err {
            ExportCourseError::NoCourseLoaded => {
                DomainError::new(ErrorCode::NoCourseLoaded, err.to_string())
            }
            ExportCourseError::Storage(e) => e.into(),
        }
    }
}

/// Handler for exporting the loaded course.
pub struct ExportCourseHandler {
    controller: Arc<StudioController>,
    storage: Arc<dyn CourseStorage>,
}

impl ExportCourseHandler {
    pub fn new(controller: Arc<StudioController>, storage: Arc<dyn CourseStorage>) -> Self {
        Self {
            controller,
            storage,
        }
    }

    pub async fn handle(&self) -> Result<StoredCourseSummary, ExportCourseError> {
        let course = self
            .controller
            .course()
            .await
            .ok_or(ExportCourseError::NoCourseLoaded)?;

        let stored = self.storage.save(&course).await?;
        info!(id = %stored.id, title = %course.title, "Course exported");

        Ok(stored.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryCourseStorage;
    use crate::domain::course::{CourseData, Quiz, QuizQuestion};
    use crate::ports::{CourseGenerator, GenerationError};
    use async_trait::async_trait;

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
            title: "Dutch".into(),
            language: "Dutch".into(),
            theory: None,
            dialogues: vec![],
            quiz: Quiz::new(
                "Quiz",
                vec![QuizQuestion::new("Dank je?", vec!["thanks".into(), "hi".into()], 0, "")],
            ),
            flashcards: vec![],
        }
    }

    #[tokio::test]
    async fn exports_loaded_course() {
        let controller = Arc::new(StudioController::new(Arc::new(NoGenerator)));
        let storage = Arc::new(InMemoryCourseStorage::new());
        controller.load_course(course()).await;

        let handler = ExportCourseHandler::new(controller, storage.clone());
        let summary = handler.handle().await.unwrap();

        assert_eq!(summary.title, "Dutch");
        assert_eq!(storage.load(summary.id).await.unwrap().course, course());
    }

    #[tokio::test]
    async fn fails_without_course() {
        let controller = Arc::new(StudioController::new(Arc::new(NoGenerator)));
        let storage = Arc::new(InMemoryCourseStorage::new());
        let handler = ExportCourseHandler::new(controller, storage);

        let err = handler.handle().await.unwrap_err();
        assert!(matches!(err, ExportCourseError::NoCourseLoaded));
        assert_eq!(DomainError::from(err).code, ErrorCode::NoCourseLoaded);
    }
}
