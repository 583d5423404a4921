//! StudioState - the tagged union held by the studio controller.

use std::sync::Arc;

use super::StudioPhase;
use crate::domain::course::CourseData;
use crate::domain::foundation::GenerationToken;

/// Message shown when a failure carries no text of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Complete state of the course studio.
///
/// Only one of loading, error and course can be present at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StudioState {
    #[default]
    Idle,
    Loading {
        token: GenerationToken,
    },
    Failed {
        message: String,
    },
    Loaded {
        course: Arc<CourseData>,
    },
}

impl StudioState {
    /// Builds a failed state, substituting the generic message for blank ones.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        StudioState::Failed { message }
    }

    /// Returns the discriminant of this state.
    pub fn phase(&self) -> StudioPhase {
        match self {
            StudioState::Idle => StudioPhase::Idle,
            StudioState::Loading { .. } => StudioPhase::Loading,
            StudioState::Failed { .. } => StudioPhase::Failed,
            StudioState::Loaded { .. } => StudioPhase::Loaded,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, StudioState::Loading { .. })
    }

    /// The error message, if the last generation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            StudioState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// The loaded course, if any.
    pub fn course(&self) -> Option<&Arc<CourseData>> {
        match self {
            StudioState::Loaded { course } => Some(course),
            _ => None,
        }
    }

    /// The token of the in-flight request, if loading.
    pub fn pending_token(&self) -> Option<GenerationToken> {
        match self {
            StudioState::Loading { token } => Some(*token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        let state = StudioState::default();
        assert_eq!(state.phase(), StudioPhase::Idle);
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert!(state.course().is_none());
    }

    #[test]
    fn failed_with_blank_message_uses_fallback() {
        assert_eq!(StudioState::failed("").error(), Some(UNKNOWN_ERROR_MESSAGE));
        assert_eq!(StudioState::failed("   ").error(), Some(UNKNOWN_ERROR_MESSAGE));
    }

    #[test]
    fn failed_keeps_real_message() {
        let state = StudioState::failed("quota exceeded");
        assert_eq!(state.error(), Some("quota exceeded"));
        assert_eq!(state.phase(), StudioPhase::Failed);
    }

    #[test]
    fn loading_exposes_token() {
        let token = GenerationToken::NONE.next();
        let state = StudioState::Loading { token };
        assert!(state.is_loading());
        assert_eq!(state.pending_token(), Some(token));
    }
}
