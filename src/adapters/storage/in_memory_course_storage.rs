//! In-Memory Course Storage Adapter
//!
//! Useful for testing and for runs that should leave nothing on disk.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::course::CourseData;
use crate::domain::foundation::CourseId;
use crate::ports::{CourseStorage, StorageError, StoredCourse, StoredCourseSummary};

/// In-memory storage for courses
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseStorage {
    courses: Arc<RwLock<HashMap<CourseId, StoredCourse>>>,
}

impl InMemoryCourseStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored courses
    pub async fn len(&self) -> usize {
        self.courses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.courses.read().await.is_empty()
    }
}

#[async_trait]
impl CourseStorage for InMemoryCourseStorage {
    async fn save(&self, course: &CourseData) -> Result<StoredCourse, StorageError> {
        let stored = StoredCourse::new(course.clone());
        self.courses.write().await.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn load(&self, id: CourseId) -> Result<StoredCourse, StorageError> {
        self.courses
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<StoredCourseSummary>, StorageError> {
        let mut summaries: Vec<_> = self
            .courses
            .read()
            .await
            .values()
            .map(StoredCourse::summary)
            .collect();
        summaries.sort_by(|a, b| b.exported_at.cmp(&a.exported_at));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::course::{Quiz, QuizQuestion};

    fn course() -> CourseData {
        CourseData {
            title: "Portuguese".into(),
            language: "Portuguese".into(),
            theory: None,
            dialogues: vec![],
            quiz: Quiz::new(
                "Quiz",
                vec![QuizQuestion::new("Obrigado?", vec!["thanks".into(), "sorry".into()], 0, "")],
            ),
            flashcards: vec![],
        }
    }

    #[tokio::test]
    async fn save_load_and_list() {
        let storage = InMemoryCourseStorage::new();
        assert!(storage.is_empty().await);

        let stored = storage.save(&course()).await.unwrap();
        assert_eq!(storage.len().await, 1);
        assert_eq!(storage.load(stored.id).await.unwrap().course, course());
        assert_eq!(storage.list().await.unwrap()[0].id, stored.id);
    }

    #[tokio::test]
    async fn load_unknown_id_is_not_found() {
        let storage = InMemoryCourseStorage::new();
        assert!(matches!(
            storage.load(CourseId::new()).await,
            Err(StorageError::NotFound(_))
        ));
    }
}
