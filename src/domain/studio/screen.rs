//! Screen selection.

use std::sync::Arc;

use super::StudioState;
use crate::domain::course::CourseData;

/// Label of the single action offered on the error screen.
pub const TRY_AGAIN_LABEL: &str = "Try Again";

/// Text shown while a course is being generated.
pub const LOADING_MESSAGE: &str = "Our AI is crafting your language course...";

/// What the front end should display.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Collect a file, a prompt or an exported course.
    Creation,
    /// Spinner while generation is in flight.
    Loading,
    /// Generation failed; offers "Try Again" which resets the studio.
    Error { message: String },
    /// Show the course; offers a way back to creation.
    Viewer { course: Arc<CourseData> },
}

impl Screen {
    /// The action label a user can trigger to return to creation, if any.
    pub fn reset_action(&self) -> Option<&'static str> {
        match self {
            Screen::Error { .. } => Some(TRY_AGAIN_LABEL),
            Screen::Viewer { .. } => Some("New Course"),
            Screen::Creation | Screen::Loading => None,
        }
    }
}

impl From<&StudioState> for Screen {
    fn from(state: &StudioState) -> Self {
        match state {
            StudioState::Idle => Screen::Creation,
            StudioState::Loading { .. } => Screen::Loading,
            StudioState::Failed { message } => Screen::Error {
                message: message.clone(),
            },
            StudioState::Loaded { course } => Screen::Viewer {
                course: Arc::clone(course),
            },
        }
    }
}
