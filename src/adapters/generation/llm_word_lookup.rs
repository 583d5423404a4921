//! LLM-backed implementation of the WordLookup port.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use super::prompts;
use super::reply::{parse_reply, trim_strings};
use crate::domain::course::WordInfo;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, GenerationError, MessageRole, RequestMetadata,
    RequestPurpose, WordLookup,
};

const LOOKUP_MAX_TOKENS: u32 = 256;
const LOOKUP_TEMPERATURE: f32 = 0.2;

/// Defines words with a single short completion.
pub struct LlmWordLookup {
    provider: Arc<dyn AIProvider>,
}

impl LlmWordLookup {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl WordLookup for LlmWordLookup {
    async fn lookup(
        &self,
        word: &str,
        language: &str,
        context: Option<&str>,
    ) -> Result<WordInfo, GenerationError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(GenerationError::empty_input("word"));
        }

        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "definition": {"type": "STRING"},
                "translation": {"type": "STRING"}
            },
            "required": ["definition", "translation"]
        });
        let request = CompletionRequest::new(RequestMetadata::new(RequestPurpose::WordLookup))
            .with_system_prompt(prompts::WORD_LOOKUP_SYSTEM_PROMPT)
            .with_message(
                MessageRole::User,
                prompts::word_lookup_message(word, language, context),
            )
            .with_temperature(LOOKUP_TEMPERATURE)
            .with_max_tokens(LOOKUP_MAX_TOKENS)
            .with_json_response(Some(schema));

        let response = self.provider.complete(request).await.map_err(|e| {
            warn!(word, language, error = %e, "Word lookup failed");
            GenerationError::Service(e)
        })?;

        let mut value = parse_reply(&response.content)?;
        trim_strings(&mut value);
        let info: WordInfo = serde_json::from_value(value).map_err(|e| {
            AIError::parse(format!("model reply is not a word definition: {}", e))
        })?;

        debug!(word, language, translation = %info.translation, "Word looked up");
        Ok(info)
    }
}
