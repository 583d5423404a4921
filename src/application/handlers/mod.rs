//! Application handlers.
//!
//! Commands that work alongside the studio controller.

mod export_course;
mod import_course;
mod lookup_word;

pub use export_course::{ExportCourseError, ExportCourseHandler};
pub use import_course::{ImportCourseCommand, ImportCourseError, ImportCourseHandler, ImportSource};
pub use lookup_word::{LookupWordCommand, LookupWordError, LookupWordHandler};
