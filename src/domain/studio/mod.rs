//! Studio module - the application state machine.
//!
//! `StudioState` is the single source of truth for what the user sees;
//! `Screen` is derived from it and never stored.

mod phase;
mod screen;
mod state;

pub use phase::StudioPhase;
pub use screen::{Screen, LOADING_MESSAGE, TRY_AGAIN_LABEL};
pub use state::{StudioState, UNKNOWN_ERROR_MESSAGE};
