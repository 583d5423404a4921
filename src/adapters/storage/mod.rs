//! Storage Adapters
//!
//! Implementations of the CourseStorage port.
//!
//! - **FileCourseStorage** - One pretty-printed JSON file per course
//! - **InMemoryCourseStorage** - Process-local map (testing)

mod file_course_storage;
mod in_memory_course_storage;

pub use file_course_storage::FileCourseStorage;
pub use in_memory_course_storage::InMemoryCourseStorage;
