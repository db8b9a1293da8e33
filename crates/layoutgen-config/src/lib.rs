//! Process-wide settings for layoutgen.
//!
//! Settings are read once at startup and are immutable afterwards:
//!
//! - [`Settings`] — Top-level settings (debug flag, LLM, Figma, server)
//! - [`LlmSettings`] — Model provider, credential and generation parameters
//! - [`FigmaSettings`] — Design-tool credential and file identifier
//! - [`Provider`] — Supported text-generation backends
//!
//! # Loading
//!
//! ```rust,ignore
//! use layoutgen_config::Settings;
//!
//! let settings = Settings::from_env()?;
//! println!("using {} ({})", settings.llm.model, settings.llm.provider);
//! ```
//!
//! Tests and embedders can supply their own key lookup:
//!
//! ```rust
//! use layoutgen_config::{Provider, Settings};
//!
//! let settings = Settings::from_lookup(|key| match key {
//!     "LLM_PROVIDER" => Some("openai".to_string()),
//!     "OPENAI_API_KEY" => Some("sk-test".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(settings.llm.provider, Provider::OpenAi);
//! assert!(!settings.figma.enabled());
//! ```

use std::fmt;
use std::str::FromStr;

const DEFAULT_TEMPERATURE: f32 = 0.1;
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_FIGMA_API_BASE: &str = "https://api.figma.com/v1";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Errors that can occur while loading settings.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    /// `LLM_PROVIDER` named a backend we do not support.
    #[error("Unknown LLM provider '{0}' (expected deepseek, openai or anthropic)")]
    UnknownProvider(String),

    /// A variable was present but could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// The selected provider has no API key configured.
    #[error("Missing API key for {provider}: set {hint}")]
    MissingCredential { provider: Provider, hint: &'static str },
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Text-generation backends.
///
/// | Provider | API | Default model |
/// |----------|-----|---------------|
/// | `DeepSeek` | OpenAI-compatible | `deepseek-chat` |
/// | `OpenAi` | OpenAI chat completions | `gpt-4o-mini` |
/// | `Anthropic` | Anthropic messages | `claude-sonnet-4-5-20250929` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    DeepSeek,
    OpenAi,
    Anthropic,
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deepseek" => Ok(Self::DeepSeek),
            "openai" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DeepSeek => "deepseek",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        };
        write!(f, "{}", s)
    }
}

impl Provider {
    /// Model used when `LLM_MODEL` is not set.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek-chat",
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-sonnet-4-5-20250929",
        }
    }

    /// API base used when `LLM_API_BASE` is not set.
    pub fn default_api_base(&self) -> &'static str {
        match self {
            Self::DeepSeek => "https://api.deepseek.com",
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    /// Environment variables searched for this provider's API key, in order.
    fn credential_keys(&self) -> &'static [&'static str] {
        match self {
            Self::DeepSeek => &["DEEPSEEK_API_KEY", "OPENAI_API_KEY"],
            Self::OpenAi => &["OPENAI_API_KEY"],
            Self::Anthropic => &["ANTHROPIC_API_KEY"],
        }
    }

    fn credential_hint(&self) -> &'static str {
        match self {
            Self::DeepSeek => "DEEPSEEK_API_KEY or OPENAI_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Language model settings.
#[derive(Clone, PartialEq)]
pub struct LlmSettings {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    pub api_base: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

// Keeps the key out of logs.
impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Figma integration settings.
#[derive(Clone, PartialEq, Default)]
pub struct FigmaSettings {
    pub access_token: Option<String>,
    pub file_key: Option<String>,
    pub api_base: String,
}

impl fmt::Debug for FigmaSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigmaSettings")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("file_key", &self.file_key)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl FigmaSettings {
    /// Loads `.env` (if present) and reads only the Figma variables.
    ///
    /// Unlike [`Settings::from_env`], no model credential is required.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the Figma variables through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));
        Self {
            access_token: get("FIGMA_ACCESS_TOKEN"),
            file_key: get("FIGMA_FILE_KEY"),
            api_base: get("FIGMA_API_BASE").unwrap_or_else(|| DEFAULT_FIGMA_API_BASE.to_string()),
        }
    }

    /// Export is enabled only when an access token is present.
    pub fn enabled(&self) -> bool {
        self.access_token.is_some()
    }
}

/// HTTP bind address for the service entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete process settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub debug: bool,
    pub llm: LlmSettings,
    pub figma: FigmaSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Loads `.env` (if present) and reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));

        let provider = match get("LLM_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => Provider::default(),
        };

        let api_key = provider
            .credential_keys()
            .iter()
            .find_map(|key| get(key))
            .ok_or(ConfigError::MissingCredential {
                provider,
                hint: provider.credential_hint(),
            })?;

        let temperature = match get("LLM_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .map_err(|_| ConfigError::invalid("LLM_TEMPERATURE", raw))?,
            None => DEFAULT_TEMPERATURE,
        };

        let max_tokens = match get("LLM_MAX_TOKENS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::invalid("LLM_MAX_TOKENS", raw))?,
            None => DEFAULT_MAX_TOKENS,
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("PORT", raw))?,
            None => DEFAULT_PORT,
        };

        let llm = LlmSettings {
            provider,
            model: get("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_string()),
            api_key,
            api_base: get("LLM_API_BASE").unwrap_or_else(|| provider.default_api_base().to_string()),
            temperature,
            max_tokens,
        };

        Ok(Self {
            debug: get("DEBUG_MODE").is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            llm,
            figma: FigmaSettings::from_lookup(&lookup),
            server: ServerSettings {
                host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
        })
    }
}

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
