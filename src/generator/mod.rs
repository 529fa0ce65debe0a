//! Answer generator boundary
//!
//! The query engine hands a bounded structural context and the question to an
//! [`AnswerGenerator`] and gets free text back. The generator is pluggable;
//! failures are absorbed by the engine and never abort a query.

mod openai;

pub use openai::OpenAiCompatibleGenerator;

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use async_trait::async_trait;
use std::sync::Arc;

/// Instruction sent with every request
pub const ANSWER_INSTRUCTIONS: &str = "You answer questions about a codebase using only the \
structural context provided: file paths, kinds, function signatures, components, types, API \
routes and dependencies. Do not assume implementation details that are not present in the \
context. If the context does not contain the answer, say so and name the files that look most \
relevant.";

/// One generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub question: String,
    /// Rendered structural context, never source bodies
    pub context: String,
    pub instructions: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(question: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: context.into(),
            instructions: ANSWER_INSTRUCTIONS.to_string(),
            temperature: 0.2,
            max_tokens: 1024,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// User message body: context first, then the question
    pub fn user_message(&self) -> String {
        format!(
            "Codebase context:\n\n{}\n\nQuestion: {}",
            self.context, self.question
        )
    }
}

/// Produces narrative answers from structural context
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Generator used when no endpoint is configured; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl AnswerGenerator for DisabledGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GeneratorError> {
        Err(GeneratorError::NotConfigured)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

/// Pick a generator for the configuration: HTTP when an API key is set,
/// otherwise disabled
pub fn create_generator(config: &GeneratorConfig) -> Result<Arc<dyn AnswerGenerator>, GeneratorError> {
    match config.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => {
            Ok(Arc::new(OpenAiCompatibleGenerator::new(config)?))
        }
        _ => {
            tracing::info!("No API key configured, answer generation is disabled");
            Ok(Arc::new(DisabledGenerator))
        }
    }
}
