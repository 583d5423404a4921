//! Word Lookup Port - On-demand definitions for words in a course.

use async_trait::async_trait;

use super::GenerationError;
use crate::domain::course::WordInfo;

/// Port for looking up a single word.
#[async_trait]
pub trait WordLookup: Send + Sync {
    /// Define `word` and translate it to English, using `language` and an
    /// optional sentence for context.
    async fn lookup(
        &self,
        word: &str,
        language: &str,
        context: Option<&str>,
    ) -> Result<WordInfo, GenerationError>;
}
