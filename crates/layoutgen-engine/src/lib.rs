//! Pipeline engine for layoutgen.
//!
//! Runs four stages in order over a [`PipelineState`]:
//!
//! 1. **Parse requirements** — model extracts a requirements mapping
//! 2. **Generate layout** — [`LayoutGenerator`] produces a layout tree
//! 3. **Refine layout** — model checks the tree for Figma compatibility
//! 4. **Export** — only if [`should_export`] holds after stage 3
//!
//! Stage faults never abort a run. Each one is recorded in the state
//! according to the [`Stage`] policy table and the next stage runs anyway.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use layoutgen_engine::PipelineEngine;
//!
//! let engine = PipelineEngine::new(Arc::new(llm_client), Arc::new(figma_client));
//! let state = engine.run("a simple login form").await;
//! println!("{} ({} errors)", state.status, state.errors.len());
//! ```

mod policy;
mod prompts;
mod summary;

pub use policy::Stage;
pub use summary::GenerationSummary;

use std::sync::Arc;
use std::time::Instant;

use layoutgen_core::{ExportResult, Layout, LayoutError, PipelineState, Status};
use layoutgen_figma::DesignExporter;
use layoutgen_llm::{extract_object, LayoutGenerator, TextGenerator};
use serde_json::Value;
use tracing::{info, warn};

/// Frame name used when the final layout has no `name`.
pub const DEFAULT_FRAME_NAME: &str = "Generated UI Layout";

/// Export runs only for a non-empty final layout and a non-error status.
pub fn should_export(state: &PipelineState) -> bool {
    !state.final_layout.is_empty() && state.status != Status::Error
}

/// Sequences the four stages.
///
/// Holds only shared, read-only collaborators, so one engine serves any
/// number of concurrent runs.
#[derive(Clone)]
pub struct PipelineEngine {
    llm: Arc<dyn TextGenerator>,
    layouts: LayoutGenerator,
    exporter: Arc<dyn DesignExporter>,
}

impl PipelineEngine {
    /// Creates an engine; stage 2 uses the same model as stages 1 and 3.
    pub fn new(llm: Arc<dyn TextGenerator>, exporter: Arc<dyn DesignExporter>) -> Self {
        Self {
            layouts: LayoutGenerator::new(Arc::clone(&llm)),
            llm,
            exporter,
        }
    }

    /// Runs the pipeline and returns the last state produced.
    pub async fn run(&self, prompt: &str) -> PipelineState {
        info!("╔══════════════════════════════════════════════════════════════");
        info!("║ PIPELINE: prompt → layout ({})", self.llm.model());
        info!("║ Input: {}...", prompt.chars().take(50).collect::<String>());
        info!("╠══════════════════════════════════════════════════════════════");

        let start = Instant::now();
        let state = PipelineState::new(prompt);
        let state = self.parse_requirements(state).await;
        let state = self.generate_layout(state).await;
        let state = self.refine_layout(state).await;

        let state = if should_export(&state) {
            self.export(state).await
        } else {
            info!("║ Export skipped: status={}, final layout empty={}", state.status, state.final_layout.is_empty());
            state
        };

        info!("║ Pipeline complete in {:?}: {} ({} errors)", start.elapsed(), state.status, state.errors.len());
        info!("╚══════════════════════════════════════════════════════════════");
        state
    }

    /// Runs the pipeline and reshapes the result for entry points.
    pub async fn generate(&self, prompt: &str) -> GenerationSummary {
        GenerationSummary::from(self.run(prompt).await)
    }

    /// Stage 1: extract a requirements mapping from the prompt.
    pub async fn parse_requirements(&self, state: PipelineState) -> PipelineState {
        let stage = Stage::ParseRequirements;
        log_stage(1, stage);

        let result = async {
            let response = self
                .llm
                .complete(prompts::REQUIREMENTS_SYSTEM_PROMPT, &prompts::requirements_prompt(&state.prompt))
                .await?;
            extract_object(&response.content)
        }
        .await;

        match result {
            Ok(requirements) => {
                info!("║     ✓ {} requirement keys", requirements.len());
                PipelineState {
                    parsed_requirements: requirements,
                    ..state
                }
                .with_progress(stage.success_message(), stage.success_status())
            }
            Err(e) => fail(state, stage, &e),
        }
    }

    /// Stage 2: generate a layout tree from the prompt and requirements.
    pub async fn generate_layout(&self, state: PipelineState) -> PipelineState {
        let stage = Stage::GenerateLayout;
        log_stage(2, stage);

        let request = prompts::layout_request(&state.prompt, &requirements_text(&state.parsed_requirements));

        match self.layouts.generate_layout(&request).await {
            Ok(layout) => {
                if layout.contains_key("error") {
                    warn!("║     ⚠ Layout generator returned an error mapping: {:?}", layout.get("message"));
                }
                PipelineState {
                    layout_structure: layout,
                    ..state
                }
                .with_progress(stage.success_message(), stage.success_status())
            }
            Err(e) => fail(state, stage, &e),
        }
    }

    /// Stage 3: ask the model to check the layout for Figma compatibility.
    ///
    /// On failure the unrefined layout becomes the final layout.
    pub async fn refine_layout(&self, state: PipelineState) -> PipelineState {
        let stage = Stage::RefineLayout;
        log_stage(3, stage);

        let result = async {
            let layout_json = serde_json::to_string_pretty(&state.layout_structure)?;
            let response = self
                .llm
                .complete(prompts::REFINE_SYSTEM_PROMPT, &prompts::refine_prompt(&layout_json))
                .await?;
            extract_object(&response.content)
        }
        .await;

        match result {
            Ok(refined) => PipelineState {
                final_layout: refined,
                ..state
            }
            .with_progress(stage.success_message(), stage.success_status()),
            Err(e) => {
                let unrefined = state.layout_structure.clone();
                fail(
                    PipelineState {
                        final_layout: unrefined,
                        ..state
                    },
                    stage,
                    &e,
                )
            }
        }
    }

    /// Stage 4: hand the final layout to the design tool.
    pub async fn export(&self, state: PipelineState) -> PipelineState {
        let stage = Stage::Export;
        log_stage(4, stage);

        if !self.exporter.is_enabled() {
            info!("║     Figma integration not enabled, skipping");
            return PipelineState {
                export_result: Some(ExportResult::Skipped {
                    message: "Figma integration not enabled".to_string(),
                }),
                ..state
            }
            .with_progress("Figma export skipped (integration not enabled).", Status::Completed);
        }

        let name = frame_name(&state.final_layout);
        let result = async {
            let nodes = self.exporter.create_frame(&name, &state.final_layout).await?;
            Ok::<_, LayoutError>(serde_json::to_value(nodes)?)
        }
        .await;

        match result {
            Ok(nodes) => PipelineState {
                export_result: Some(ExportResult::DebugMode { nodes }),
                ..state
            }
            .with_progress(stage.success_message(), stage.success_status()),
            Err(e) => {
                let export_result = Some(ExportResult::Error { message: e.to_string() });
                fail(PipelineState { export_result, ..state }, stage, &e)
            }
        }
    }
}

/// Records a stage fault according to the policy table.
fn fail(state: PipelineState, stage: Stage, error: &LayoutError) -> PipelineState {
    let message = stage.error_message(error);
    warn!("║     ✗ {}", message);
    state.with_error(message, stage.failure_status())
}

fn log_stage(step: usize, stage: Stage) {
    info!("╠──────────────────────────────────────────────────────────────");
    info!("║ [{}] STAGE: {}", step, stage.name());
}

fn frame_name(layout: &Layout) -> String {
    layout
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_FRAME_NAME)
        .to_string()
}

/// Renders requirements as `- key: value` lines.
fn requirements_text(requirements: &Layout) -> String {
    requirements
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("- {}: {}", key, s),
            other => format!("- {}: {}", key, other),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layout(value: Value) -> Layout {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_should_export_positive() {
        let state = PipelineState {
            final_layout: layout(json!({ "name": "Form" })),
            status: Status::LayoutRefined,
            ..PipelineState::new("p")
        };
        assert!(should_export(&state));

        let partial = PipelineState {
            status: Status::PartialSuccess,
            ..state
        };
        assert!(should_export(&partial));
    }

    #[test]
    fn test_should_export_skips_empty_layout() {
        let state = PipelineState {
            status: Status::LayoutRefined,
            ..PipelineState::new("p")
        };
        assert!(!should_export(&state));
    }

    #[test]
    fn test_should_export_skips_error_status() {
        let state = PipelineState {
            final_layout: layout(json!({ "name": "Form" })),
            status: Status::Error,
            ..PipelineState::new("p")
        };
        assert!(!should_export(&state));
    }

    #[test]
    fn test_requirements_text() {
        let requirements = layout(json!({
            "layout_type": "form",
            "components": ["email", "password"],
            "responsive": true
        }));
        let text = requirements_text(&requirements);
        assert!(text.contains("- layout_type: form"));
        assert!(text.contains("- components: [\"email\",\"password\"]"));
        assert!(text.contains("- responsive: true"));
        assert_eq!(text.lines().count(), 3);
        assert_eq!(requirements_text(&Layout::new()), "");
    }

    #[test]
    fn test_frame_name_defaults() {
        assert_eq!(frame_name(&layout(json!({ "name": "Checkout" }))), "Checkout");
        assert_eq!(frame_name(&layout(json!({ "name": 7 }))), DEFAULT_FRAME_NAME);
        assert_eq!(frame_name(&Layout::new()), DEFAULT_FRAME_NAME);
    }

    #[test]
    fn test_layout_request_includes_requirements() {
        let request = prompts::layout_request("  a login form ", "- layout_type: form");
        assert!(request.starts_with("a login form\n\nBased on these requirements:\n- layout_type: form"));
    }
}
