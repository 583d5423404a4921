//! State machine trait for phase enums.
//!
//! Gives every lifecycle enum the same interface for validating and
//! performing transitions.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for StudioPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (_, Idle) | (_, Loading) | (_, Loaded) | (Loading, Failed)
///         )
///     }
///     // ...
/// }
///
/// let next = current.transition_to(StudioPhase::Loading)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum LessonProgress {
        NotStarted,
        Reading,
        Quizzing,
        Finished,
    }

    impl StateMachine for LessonProgress {
        fn can_transition_to(&self, target: &Self) -> bool {
            use LessonProgress::*;
            matches!(
                (self, target),
                (NotStarted, Reading) | (Reading, Quizzing) | (Quizzing, Finished)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use LessonProgress::*;
            match self {
                NotStarted => vec![Reading],
                Reading => vec![Quizzing],
                Quizzing => vec![Finished],
                Finished => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = LessonProgress::NotStarted.transition_to(LessonProgress::Reading);
        assert_eq!(result, Ok(LessonProgress::Reading));
    }

    #[test]
    fn transition_to_fails_for_skipped_step() {
        let result = LessonProgress::NotStarted.transition_to(LessonProgress::Finished);
        assert!(result.is_err());
    }

    #[test]
    fn finished_is_terminal() {
        assert!(LessonProgress::Finished.is_terminal());
        assert!(!LessonProgress::Reading.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [
            LessonProgress::NotStarted,
            LessonProgress::Reading,
            LessonProgress::Quizzing,
            LessonProgress::Finished,
        ] {
            for target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }
}
