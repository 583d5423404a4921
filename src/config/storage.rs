//! Course storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where exported courses are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_courses_dir")]
    pub courses_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.courses_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__COURSES_DIR"));
        }
        if self.courses_dir.is_file() {
            return Err(ValidationError::CoursesDirIsFile(self.courses_dir.clone()));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            courses_dir: default_courses_dir(),
        }
    }
}

fn default_courses_dir() -> PathBuf {
    PathBuf::from("./courses")
}
