//! Course Storage Port - Saving and reloading generated courses.
//!
//! Exported courses are plain JSON so they can be shared and re-imported
//! later without another model call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::course::CourseData;
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, Timestamp};

/// Errors that can occur during course storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Course not found: {0}")]
    NotFound(CourseId),

    #[error("Failed to serialize course: {0}")]
    SerializationFailed(String),

    #[error("Failed to read course file: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::NotFound(_) => ErrorCode::CourseNotFound,
            StorageError::DeserializationFailed(_) => ErrorCode::InvalidJson,
            StorageError::SerializationFailed(_) | StorageError::IoError(_) => {
                ErrorCode::StorageError
            }
        };
        DomainError::new(code, err.to_string())
    }
}

/// A course as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCourse {
    pub id: CourseId,
    pub exported_at: Timestamp,
    pub course: CourseData,
}

impl StoredCourse {
    /// Wraps a course with a fresh id and the current time.
    pub fn new(course: CourseData) -> Self {
        Self {
            id: CourseId::new(),
            exported_at: Timestamp::now(),
            course,
        }
    }

    pub fn summary(&self) -> StoredCourseSummary {
        StoredCourseSummary {
            id: self.id,
            title: self.course.title.clone(),
            language: self.course.language.clone(),
            exported_at: self.exported_at,
        }
    }
}

/// Listing entry for a stored course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCourseSummary {
    pub id: CourseId,
    pub title: String,
    pub language: String,
    pub exported_at: Timestamp,
}

/// Any JSON document accepted on import.
///
/// Exports are wrapped in a `StoredCourse` envelope, but a bare course
/// (as produced by hand or by older tools) is accepted too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CourseDocument {
    Stored(StoredCourse),
    Bare(CourseData),
}

impl CourseDocument {
    /// Parses an exported or bare course document.
    pub fn from_json(text: &str) -> Result<Self, StorageError> {
        serde_json::from_str(text).map_err(|e| StorageError::DeserializationFailed(e.to_string()))
    }

    pub fn course(&self) -> &CourseData {
        match self {
            CourseDocument::Stored(stored) => &stored.course,
            CourseDocument::Bare(course) => course,
        }
    }

    pub fn into_course(self) -> CourseData {
        match self {
            CourseDocument::Stored(stored) => stored.course,
            CourseDocument::Bare(course) => course,
        }
    }
}

/// Port for persisting and loading courses.
#[async_trait]
pub trait CourseStorage: Send + Sync {
    /// Save a course, returning the stored record.
    async fn save(&self, course: &CourseData) -> Result<StoredCourse, StorageError>;

    /// Load a previously saved course.
    ///
    /// # Errors
    /// Returns `StorageError::NotFound` if no course exists with this id.
    async fn load(&self, id: CourseId) -> Result<StoredCourse, StorageError>;

    /// List saved courses, newest first.
    async fn list(&self) -> Result<Vec<StoredCourseSummary>, StorageError>;
}
