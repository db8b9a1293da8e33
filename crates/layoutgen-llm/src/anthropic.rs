//! Anthropic Claude API client.

use std::time::Instant;

use async_trait::async_trait;
use layoutgen_config::LlmSettings;
use layoutgen_core::LayoutError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::llm_err;
use crate::{LlmMetrics, LlmResponse, TextGenerator};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: Option<u32>,
    output_tokens: Option<u32>,
}

/// A content block in the response; only text blocks carry output.
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

/// Client for Anthropic's Claude API.
pub struct AnthropicClient {
    client: Client,
    model: String,
    api_key: String,
    api_base: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    pub fn new(settings: &LlmSettings) -> Self {
        info!(
            "AnthropicClient: model={}, api_key_len={}",
            settings.model,
            settings.api_key.len()
        );
        Self {
            client: Client::new(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Sends a non-streaming chat request and returns the complete response.
    pub async fn chat(&self, system_prompt: &str, user_input: &str) -> Result<LlmResponse, LayoutError> {
        let start = Instant::now();

        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: system_prompt,
            messages: vec![AnthropicMessage {
                role: "user",
                content: user_input,
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.api_base))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(llm_err)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LayoutError::Llm(format!(
                "Anthropic API error {}: {}",
                status, body
            )));
        }

        let resp: MessagesResponse = response.json().await.map_err(llm_err)?;

        let content = resp
            .content
            .into_iter()
            .filter_map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        let metrics = LlmMetrics {
            input_tokens: resp.usage.input_tokens.unwrap_or(0),
            output_tokens: resp.usage.output_tokens.unwrap_or(0),
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "LLM: {}ms, tokens: {}/{} (in/out)",
            metrics.elapsed_ms, metrics.input_tokens, metrics.output_tokens
        );
        debug!("Raw response: {}", content);

        Ok(LlmResponse { content, metrics })
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn complete(&self, system_prompt: &str, user_input: &str) -> Result<LlmResponse, LayoutError> {
        self.chat(system_prompt, user_input).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
