//! Unified LLM client that routes to the configured provider.

use async_trait::async_trait;
use layoutgen_config::{LlmSettings, Provider};
use layoutgen_core::LayoutError;

use crate::anthropic::AnthropicClient;
use crate::client::LlmClient;
use crate::{LlmResponse, TextGenerator};

/// Backend chosen from settings.
enum Backend {
    OpenAiCompatible(LlmClient),
    Anthropic(AnthropicClient),
}

/// Client that sends requests to DeepSeek, OpenAI or Anthropic depending on
/// [`LlmSettings::provider`].
pub struct UnifiedLlmClient {
    provider: Provider,
    backend: Backend,
}

impl UnifiedLlmClient {
    /// Creates a client for the configured provider.
    pub fn from_settings(settings: &LlmSettings) -> Self {
        let backend = match settings.provider {
            Provider::DeepSeek | Provider::OpenAi => Backend::OpenAiCompatible(LlmClient::new(settings)),
            Provider::Anthropic => Backend::Anthropic(AnthropicClient::new(settings)),
        };

        Self {
            provider: settings.provider,
            backend,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Returns true if this client is configured for Anthropic.
    pub fn is_anthropic(&self) -> bool {
        matches!(self.backend, Backend::Anthropic(_))
    }
}

#[async_trait]
impl TextGenerator for UnifiedLlmClient {
    async fn complete(&self, system_prompt: &str, user_input: &str) -> Result<LlmResponse, LayoutError> {
        match &self.backend {
            Backend::OpenAiCompatible(client) => client.chat(system_prompt, user_input).await,
            Backend::Anthropic(client) => client.chat(system_prompt, user_input).await,
        }
    }

    fn model(&self) -> &str {
        match &self.backend {
            Backend::OpenAiCompatible(client) => client.model(),
            Backend::Anthropic(client) => client.model(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: Provider) -> LlmSettings {
        LlmSettings {
            provider,
            model: provider.default_model().into(),
            api_key: "k".into(),
            api_base: provider.default_api_base().into(),
            temperature: 0.1,
            max_tokens: 1024,
        }
    }

    #[test]
    fn test_routes_by_provider() {
        let deepseek = UnifiedLlmClient::from_settings(&settings(Provider::DeepSeek));
        assert!(!deepseek.is_anthropic());
        assert_eq!(deepseek.model(), "deepseek-chat");

        let openai = UnifiedLlmClient::from_settings(&settings(Provider::OpenAi));
        assert!(!openai.is_anthropic());
        assert_eq!(openai.provider(), Provider::OpenAi);

        let claude = UnifiedLlmClient::from_settings(&settings(Provider::Anthropic));
        assert!(claude.is_anthropic());
        assert_eq!(claude.model(), "claude-sonnet-4-5-20250929");
    }
}
