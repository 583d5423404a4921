//! File-based Course Storage Adapter
//!
//! Stores each exported course as `<base>/<id>.json`, pretty-printed so the
//! files can be read and shared by hand.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::course::CourseData;
use crate::domain::foundation::CourseId;
use crate::ports::{CourseStorage, StorageError, StoredCourse, StoredCourseSummary};

/// File-based storage for exported courses
#[derive(Debug, Clone)]
pub struct FileCourseStorage {
    base_path: PathBuf,
}

impl FileCourseStorage {
    /// Create a new file storage rooted at `base_path`
    ///
    /// The directory is created on first save.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a course
    pub fn course_path(&self, id: CourseId) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }

    async fn read_stored(path: &Path) -> Result<StoredCourse, StorageError> {
        let json = fs::read_to_string(path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        serde_json::from_str(&json).map_err(|e| StorageError::DeserializationFailed(e.to_string()))
    }
}

#[async_trait]
impl CourseStorage for FileCourseStorage {
    async fn save(&self, course: &CourseData) -> Result<StoredCourse, StorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        let stored = StoredCourse::new(course.clone());
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        let path = self.course_path(stored.id);
        fs::write(&path, json)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        debug!(id = %stored.id, path = %path.display(), "Course saved");
        Ok(stored)
    }

    async fn load(&self, id: CourseId) -> Result<StoredCourse, StorageError> {
        let path = self.course_path(id);

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(id));
        }

        Self::read_stored(&path).await
    }

    async fn list(&self) -> Result<Vec<StoredCourseSummary>, StorageError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::IoError(e.to_string())),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            // Foreign files in the directory are skipped, not fatal.
            match Self::read_stored(&path).await {
                Ok(stored) => summaries.push(stored.summary()),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable course file"),
            }
        }

        summaries.sort_by(|a, b| b.exported_at.cmp(&a.exported_at));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::course::{Dialogue, DialogueLine, Flashcard, Quiz, QuizQuestion, Theory};
    use tempfile::TempDir;

    fn test_course(title: &str) -> CourseData {
        CourseData {
            title: title.into(),
            language: "German".into(),
            theory: Some(Theory::new("Articles", "der, die, das")),
            dialogues: vec![Dialogue::new(
                "Bakery",
                vec!["Kunde".into(), "Bäcker".into()],
                vec![DialogueLine::new("Kunde", "Zwei Brötchen, bitte.")],
            )],
            quiz: Quiz::new(
                "Quiz",
                vec![QuizQuestion::new(
                    "Brötchen?",
                    vec!["roll".into(), "cake".into()],
                    0,
                    "A bread roll.",
                )],
            ),
            flashcards: vec![Flashcard::new("das Brot", "bread")],
        }
    }

    #[tokio::test]
    async fn save_then_load_reproduces_course() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileCourseStorage::new(temp_dir.path().join("courses"));

        let course = test_course("German Basics");
        let stored = storage.save(&course).await.unwrap();

        assert!(storage.course_path(stored.id).exists());
        let loaded = storage.load(stored.id).await.unwrap();
        assert_eq!(loaded.course, course);
        assert_eq!(loaded.id, stored.id);
        assert_eq!(loaded.exported_at, stored.exported_at);
    }

    #[tokio::test]
    async fn load_missing_course_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileCourseStorage::new(temp_dir.path());

        let result = storage.load(CourseId::new()).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn load_corrupt_file_is_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileCourseStorage::new(temp_dir.path());
        let id = CourseId::new();
        std::fs::write(storage.course_path(id), "{ broken").unwrap();

        let result = storage.load(id).await;
        assert!(matches!(result, Err(StorageError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn list_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileCourseStorage::new(temp_dir.path().join("nothing-here"));
        assert!(storage.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_returns_newest_first_and_skips_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileCourseStorage::new(temp_dir.path());

        let first = storage.save(&test_course("First")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = storage.save(&test_course("Second")).await.unwrap();
        std::fs::write(temp_dir.path().join("notes.json"), "[]").unwrap();
        std::fs::write(temp_dir.path().join("readme.txt"), "hi").unwrap();

        let listed = storage.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(listed[1].title, "First");
    }
}
