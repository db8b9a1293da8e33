//! # layoutgen — natural language to Figma-compatible layouts
//!
//! A prompt such as "a simple login form" goes through four stages:
//! requirement extraction, layout generation, compatibility refinement and
//! an optional Figma export. Every stage records its own faults, so a run
//! always yields a [`GenerationSummary`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use layoutgen::prelude::*;
//!
//! let settings = Settings::from_env()?;
//! let engine = layoutgen::bootstrap(&settings);
//!
//! let summary = engine.generate("a pricing page with three tiers").await;
//! println!("{}: {}", summary.status, serde_json::to_string_pretty(&summary.layout)?);
//! ```
//!
//! Synchronous callers can use [`blocking::generate_ui_layout`].
//!
//! ## Crate Structure
//!
//! | Crate | Description |
//! |-------|-------------|
//! | [`layoutgen_config`] | Settings loaded from the environment |
//! | [`layoutgen_core`] | Error type, pipeline state, layout nodes |
//! | [`layoutgen_engine`] | The four-stage pipeline |
//! | [`layoutgen_llm`] | Model clients (DeepSeek, OpenAI, Anthropic) |
//! | [`layoutgen_figma`] | Figma client and node conversion |

use std::sync::Arc;

// Re-export config types
pub use layoutgen_config::{ConfigError, FigmaSettings, LlmSettings, Provider, ServerSettings, Settings};

// Re-export core types
pub use layoutgen_core::{
    ExportResult, Layout, LayoutError, LayoutNode, PipelineState, StageMessage, Status,
};

// Re-export engine
pub use layoutgen_engine::{should_export, GenerationSummary, PipelineEngine, Stage, DEFAULT_FRAME_NAME};

// Re-export clients
pub use layoutgen_figma::{convert_layout, hex_to_rgb, DesignExporter, FigmaClient, FigmaNode};
pub use layoutgen_llm::{
    extract_json, AnthropicClient, LayoutGenerator, LlmClient, LlmResponse, TextGenerator,
    UnifiedLlmClient,
};

/// Common imports.
pub mod prelude {
    pub use crate::{
        bootstrap, DesignExporter, ExportResult, GenerationSummary, Layout, LayoutError,
        PipelineEngine, PipelineState, Settings, Status, TextGenerator,
    };
}

/// Builds an engine wired to the configured model and Figma clients.
pub fn bootstrap(settings: &Settings) -> PipelineEngine {
    let llm = UnifiedLlmClient::from_settings(&settings.llm);
    let figma = FigmaClient::from_settings(settings);
    PipelineEngine::new(Arc::new(llm), Arc::new(figma))
}

pub mod blocking {
    //! Synchronous wrappers around the async engine.

    use crate::{bootstrap, ConfigError, GenerationSummary, Settings};

    #[derive(thiserror::Error, Debug)]
    pub enum BlockingError {
        #[error(transparent)]
        Config(#[from] ConfigError),

        #[error("Failed to start runtime: {0}")]
        Runtime(#[from] std::io::Error),
    }

    /// Loads settings from the environment and runs one prompt.
    pub fn generate_ui_layout(prompt: &str) -> Result<GenerationSummary, BlockingError> {
        let settings = Settings::from_env()?;
        generate_ui_layout_with(&settings, prompt)
    }

    /// Runs one prompt with explicit settings on a private current-thread runtime.
    ///
    /// Must not be called from inside an async runtime.
    pub fn generate_ui_layout_with(settings: &Settings, prompt: &str) -> Result<GenerationSummary, BlockingError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let engine = bootstrap(settings);
        Ok(runtime.block_on(engine.generate(prompt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(lookup: &[(&str, &str)]) -> Settings {
        let pairs: Vec<(String, String)> = lookup
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(move |key| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()))
            .unwrap()
    }

    #[test]
    fn test_blocking_run_against_unreachable_model() {
        let settings = settings(&[
            ("LLM_PROVIDER", "openai"),
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_API_BASE", "http://127.0.0.1:9"),
        ]);

        let summary = blocking::generate_ui_layout_with(&settings, "a simple login form").unwrap();

        // Every model call fails; nothing reaches the export stage.
        assert_eq!(summary.errors.len(), 3);
        assert_eq!(summary.status, Status::PartialSuccess);
        assert!(summary.layout.is_empty());
        assert!(summary.figma_response.is_none());
    }
}
