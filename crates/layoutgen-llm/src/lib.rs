//! Text-generation clients for layoutgen.
//!
//! This crate wraps the single call the pipeline needs from a language
//! model: "send a prompt, receive free-form text".
//!
//! - [`TextGenerator`] — The call, as a trait so stages can be tested with fakes
//! - [`UnifiedLlmClient`] — Recommended: picks the backend from [`LlmSettings`]
//! - [`LlmClient`] — OpenAI-compatible client (OpenAI, DeepSeek)
//! - [`AnthropicClient`] — Claude models via the Anthropic messages API
//! - [`LayoutGenerator`] — Turns a description into a layout tree
//! - [`extract_json`] / [`extract_object`] — Fenced-block JSON extraction
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use layoutgen_config::Settings;
//! use layoutgen_llm::{LayoutGenerator, UnifiedLlmClient};
//!
//! let settings = Settings::from_env()?;
//! let client = Arc::new(UnifiedLlmClient::from_settings(&settings.llm));
//! let generator = LayoutGenerator::new(client);
//!
//! let layout = generator.generate_layout("a pricing page with three tiers").await?;
//! if layout.contains_key("error") {
//!     eprintln!("model output was not JSON: {:?}", layout.get("message"));
//! }
//! ```
//!
//! [`LlmSettings`]: layoutgen_config::LlmSettings

mod anthropic;
mod client;
mod extract;
mod layout;
mod unified;

pub use anthropic::AnthropicClient;
pub use client::{LlmClient, LlmMetrics, LlmResponse};
pub use extract::{extract_json, extract_object};
pub use layout::{LayoutGenerator, LAYOUT_PARSE_ERROR};
pub use unified::UnifiedLlmClient;

use async_trait::async_trait;
use layoutgen_core::LayoutError;

/// A language model that completes a system + user prompt pair.
///
/// Implementations hold no per-request state, so one instance can serve
/// concurrent pipeline runs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one request and returns the model's text.
    async fn complete(&self, system_prompt: &str, user_input: &str) -> Result<LlmResponse, LayoutError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
