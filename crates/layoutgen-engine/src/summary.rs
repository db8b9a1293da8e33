//! Entry-point view of a finished run.

use layoutgen_core::{ExportResult, Layout, PipelineState, StageMessage, Status};
use serde::{Deserialize, Serialize};

/// The subset of [`PipelineState`] handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub status: Status,
    pub layout: Layout,
    pub figma_response: Option<ExportResult>,
    pub errors: Vec<String>,
    pub messages: Vec<StageMessage>,
}

impl From<PipelineState> for GenerationSummary {
    fn from(state: PipelineState) -> Self {
        Self {
            status: state.status,
            layout: state.final_layout,
            figma_response: state.export_result,
            errors: state.errors,
            messages: state.messages,
        }
    }
}
