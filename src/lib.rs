//! Course Studio - AI-generated language courses
//!
//! Turns an uploaded JSON document or a free-text prompt into a structured
//! language course (theory, dialogues, quiz, flashcards) and tracks which
//! screen the user should see through a small state machine.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
