//! StudioPhase enum - the discriminant of the studio state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Which of the four studio states is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StudioPhase {
    /// Nothing generated yet; the creation screen is shown.
    #[default]
    Idle,
    /// A generation request is in flight.
    Loading,
    /// The last generation failed.
    Failed,
    /// A course is available for viewing.
    Loaded,
}

impl StateMachine for StudioPhase {
    /// Valid transitions:
    /// - any -> Idle (reset)
    /// - any -> Loading (submit; a newer submit supersedes an older one)
    /// - any -> Loaded (generation success or direct load)
    /// - Loading -> Failed
    fn can_transition_to(&self, target: &Self) -> bool {
        use StudioPhase::*;
        match target {
            Idle | Loading | Loaded => true,
            Failed => matches!(self, Loading),
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use StudioPhase::*;
        match self {
            Loading => vec![Idle, Loading, Failed, Loaded],
            Idle | Failed | Loaded => vec![Idle, Loading, Loaded],
        }
    }
}

impl fmt::Display for StudioPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StudioPhase::Idle => "Idle",
            StudioPhase::Loading => "Loading",
            StudioPhase::Failed => "Failed",
            StudioPhase::Loaded => "Loaded",
        };
        write!(f, "{}", s)
    }
}
