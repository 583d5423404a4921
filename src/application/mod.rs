//! Application layer - the studio controller and its command handlers.
//!
//! The controller owns the studio state machine; handlers cover export,
//! import and word lookup around it.

mod controller;
pub mod handlers;

pub use controller::{StudioController, SubmitOutcome};
pub use handlers::{
    ExportCourseError, ExportCourseHandler, ImportCourseCommand, ImportCourseError,
    ImportCourseHandler, ImportSource, LookupWordCommand, LookupWordError, LookupWordHandler,
};
