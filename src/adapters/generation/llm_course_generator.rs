//! LLM-backed implementation of the CourseGenerator port.
//!
//! Each call is one completion: build the request, strip any code fence
//! from the reply, trim every string, validate the result against the course
//! schema, then deserialize.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::prompts;
use super::reply::{parse_reply, trim_strings};
use crate::domain::course::CourseData;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CourseGenerator, CourseSchemaValidator,
    GenerationError, MessageRole, RequestMetadata, RequestPurpose,
};

/// Sampling settings applied to every course request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 8192,
        }
    }
}

/// Generates courses through an `AIProvider`.
pub struct LlmCourseGenerator {
    provider: Arc<dyn AIProvider>,
    validator: Arc<dyn CourseSchemaValidator>,
    settings: GenerationSettings,
}

impl LlmCourseGenerator {
    pub fn new(provider: Arc<dyn AIProvider>, validator: Arc<dyn CourseSchemaValidator>) -> Self {
        Self {
            provider,
            validator,
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    fn build_request(
        &self,
        purpose: RequestPurpose,
        system_prompt: String,
        message: String,
    ) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(purpose))
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, message)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_output_tokens)
            .with_json_response(Some(self.validator.response_schema().clone()))
    }

    async fn run(&self, request: CompletionRequest) -> Result<CourseData, GenerationError> {
        let purpose = request.metadata.purpose;
        let trace_id = request.metadata.trace_id.clone();
        let info = self.provider.provider_info();

        info!(
            %purpose,
            %trace_id,
            provider = %info.name,
            model = %info.model,
            prompt_chars = request.prompt_len(),
            "Requesting course from model"
        );

        let response = self.provider.complete(request).await.map_err(|e| {
            warn!(%purpose, %trace_id, error = %e, "Model call failed");
            GenerationError::Service(e)
        })?;

        debug!(
            %trace_id,
            finish_reason = ?response.finish_reason,
            total_tokens = response.usage.total_tokens,
            "Model replied"
        );

        let course = self.coerce(&response.content).map_err(|e| {
            warn!(%purpose, %trace_id, error = %e, "Model reply rejected");
            e
        })?;

        let summary = course.summary();
        info!(
            %purpose,
            %trace_id,
            title = %course.title,
            language = %course.language,
            dialogues = summary.dialogues,
            questions = summary.questions,
            flashcards = summary.flashcards,
            "Course generated"
        );
        Ok(course)
    }

    /// Turns raw model text into a validated course.
    ///
    /// Trimming comes first so the validator sees the strings that will be
    /// stored. The result must also pass `CourseData::validate`, the same
    /// gate an exported course goes through on import.
    fn coerce(&self, content: &str) -> Result<CourseData, GenerationError> {
        let mut document: Value = parse_reply(content)?;
        trim_strings(&mut document);
        self.validator.validate(&document)?;
        let course: CourseData = serde_json::from_value(document).map_err(|e| {
            GenerationError::Service(AIError::parse(format!(
                "model reply does not match the course model: {}",
                e
            )))
        })?;
        course
            .validate()
            .map_err(|e| GenerationError::InvalidCourse(e.into()))?;
        Ok(course)
    }
}

#[async_trait]
impl CourseGenerator for LlmCourseGenerator {
    async fn generate_from_structured_input(
        &self,
        file_content: &str,
    ) -> Result<CourseData, GenerationError> {
        if file_content.trim().is_empty() {
            return Err(GenerationError::empty_input("file content"));
        }

        let document: Value = serde_json::from_str(file_content)
            .map_err(|e| GenerationError::parse(e.to_string()))?;

        // Re-serialized so the model sees compact, well-formed JSON.
        let request = self.build_request(
            RequestPurpose::StructuredCourse,
            prompts::structured_course_system_prompt(),
            prompts::structured_course_message(&document.to_string()),
        );
        self.run(request).await
    }

    async fn generate_from_prompt(&self, prompt: &str) -> Result<CourseData, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::empty_input("prompt"));
        }

        let request = self.build_request(
            RequestPurpose::PromptCourse,
            prompts::prompt_course_system_prompt(),
            prompts::prompt_course_message(prompt.trim()),
        );
        self.run(request).await
    }
}
