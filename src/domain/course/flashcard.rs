//! Flashcards and word information.

use serde::{Deserialize, Serialize};

/// A front/back vocabulary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Returns the card with its sides swapped.
    pub fn flipped(&self) -> Self {
        Self {
            front: self.back.clone(),
            back: self.front.clone(),
        }
    }
}

/// Definition and translation of a single word, shown on demand in the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordInfo {
    pub definition: String,
    pub translation: String,
}
