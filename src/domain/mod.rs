//! Domain layer containing the course model and studio state.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, state machine trait)
//! - `course` - The generated course and its sections
//! - `studio` - Studio state machine and screen selection

pub mod course;
pub mod foundation;
pub mod studio;
