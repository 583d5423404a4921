//! Dialogue value objects.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::ValidationError;

/// A scripted conversation between named participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialogue {
    pub title: String,
    pub participants: Vec<String>,
    pub lines: Vec<DialogueLine>,
}

/// One spoken line in a dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub speaker: String,
    pub line: String,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            line: line.into(),
        }
    }
}

impl Dialogue {
    /// Creates a dialogue.
    pub fn new(
        title: impl Into<String>,
        participants: Vec<String>,
        lines: Vec<DialogueLine>,
    ) -> Self {
        Self {
            title: title.into(),
            participants,
            lines,
        }
    }

    /// Returns true if `name` is one of the dialogue's participants.
    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    /// Lines whose speaker is not listed among the participants.
    pub fn unknown_speakers(&self) -> impl Iterator<Item = (usize, &DialogueLine)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !self.has_participant(&line.speaker))
    }

    pub(crate) fn validate(&self, path: &str) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.title", path)));
        }

        let mut seen = HashSet::new();
        for name in &self.participants {
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::duplicate(
                    format!("{}.participants", path),
                    name.clone(),
                ));
            }
        }

        if let Some((i, line)) = self.unknown_speakers().next() {
            return Err(ValidationError::invalid_format(
                format!("{}.lines[{}].speaker", path, i),
                format!("'{}' is not a participant", line.speaker),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe() -> Dialogue {
        Dialogue::new(
            "At the café",
            vec!["Ana".into(), "Luis".into()],
            vec![
                DialogueLine::new("Ana", "¡Hola! ¿Qué tal?"),
                DialogueLine::new("Luis", "Muy bien, gracias."),
            ],
        )
    }

    #[test]
    fn valid_dialogue_passes() {
        assert!(cafe().validate("dialogues[0]").is_ok());
    }

    #[test]
    fn unknown_speaker_is_flagged() {
        let mut dialogue = cafe();
        dialogue.lines.push(DialogueLine::new("Waiter", "¿Algo más?"));

        let unknown: Vec<_> = dialogue.unknown_speakers().map(|(i, _)| i).collect();
        assert_eq!(unknown, vec![2]);

        let err = dialogue.validate("dialogues[0]").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFormat { ref field, .. } if field == "dialogues[0].lines[2].speaker"
        ));
    }

    #[test]
    fn duplicate_participants_are_rejected() {
        let mut dialogue = cafe();
        dialogue.participants.push("Ana".into());
        assert_eq!(
            dialogue.validate("d").unwrap_err(),
            ValidationError::duplicate("d.participants", "Ana")
        );
    }
}
