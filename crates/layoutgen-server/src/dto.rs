//! Data transfer objects for the HTTP API.

use layoutgen_core::{Layout, Status};
use layoutgen_engine::GenerationSummary;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub options: Option<Map<String, Value>>,
}

/// Response of `POST /generate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub status: Status,
    pub layout: Layout,
    pub errors: Vec<String>,
    pub figma_url: Option<String>,
}

impl From<GenerationSummary> for GenerateResponse {
    fn from(summary: GenerationSummary) -> Self {
        Self {
            status: summary.status,
            layout: summary.layout,
            errors: summary.errors,
            // Frame export never reaches Figma, so there is no URL to hand back.
            figma_url: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
