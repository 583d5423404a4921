//! Validation adapters - Implementations of the CourseSchemaValidator port.

mod json_course_validator;

pub use json_course_validator::JsonCourseValidator;
