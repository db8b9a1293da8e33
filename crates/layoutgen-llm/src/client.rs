//! OpenAI-compatible chat client.
//!
//! Works with the OpenAI API and any compatible endpoint, which is how
//! DeepSeek is reached.

use std::time::Instant;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;
use layoutgen_config::LlmSettings;
use layoutgen_core::LayoutError;
use tracing::{debug, info};

use crate::TextGenerator;

/// Token usage and timing metrics from an LLM call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmMetrics {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub elapsed_ms: u64,
}

/// Complete response from an LLM call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub content: String,
    pub metrics: LlmMetrics,
}

impl LlmResponse {
    /// A response with no metrics attached.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metrics: LlmMetrics::default(),
        }
    }
}

/// Converts any error into a `LayoutError::Llm`.
pub(crate) fn llm_err(e: impl ToString) -> LayoutError {
    LayoutError::Llm(e.to_string())
}

/// Builds the message list for a simple system + user request.
fn build_messages(
    system_prompt: &str,
    user_input: &str,
) -> Result<Vec<ChatCompletionRequestMessage>, LayoutError> {
    Ok(vec![
        ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(llm_err)?,
        ),
        ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_input)
                .build()
                .map_err(llm_err)?,
        ),
    ])
}

/// Extracts content and metrics from a completion response.
fn extract_response(response: CreateChatCompletionResponse, elapsed_ms: u64) -> Result<LlmResponse, LayoutError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| LayoutError::Llm("No response content".into()))?;

    let (input_tokens, output_tokens) = response
        .usage
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or((0, 0));

    info!(
        "LLM: {}ms, tokens: {}/{} (in/out)",
        elapsed_ms, input_tokens, output_tokens
    );

    Ok(LlmResponse {
        content,
        metrics: LlmMetrics { input_tokens, output_tokens, elapsed_ms },
    })
}

/// Client for OpenAI-compatible chat completion APIs.
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmClient {
    /// Creates a client from the configured model, endpoint and credential.
    pub fn new(settings: &LlmSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(&settings.api_base)
            .with_api_key(&settings.api_key);

        Self {
            client: Client::with_config(config),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Sends a chat request and returns the complete response.
    #[allow(deprecated)]
    pub async fn chat(&self, system_prompt: &str, user_input: &str) -> Result<LlmResponse, LayoutError> {
        let start = Instant::now();
        let messages = build_messages(system_prompt, user_input)?;

        // DeepSeek only understands `max_tokens`, not `max_completion_tokens`.
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(llm_err)?;

        let response = self.client.chat().create(request).await.map_err(llm_err)?;
        let response = extract_response(response, start.elapsed().as_millis() as u64)?;
        debug!("Raw response: {}", response.content);
        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, system_prompt: &str, user_input: &str) -> Result<LlmResponse, LayoutError> {
        self.chat(system_prompt, user_input).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
