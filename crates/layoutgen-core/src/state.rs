//! Pipeline state threaded through the stages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Layout;

/// Where a pipeline run currently stands.
///
/// | Tag | Written by |
/// |-----|------------|
/// | `started` | initial state |
/// | `requirements_parsed` | stage 1 success |
/// | `layout_generated` | stage 2 success |
/// | `layout_refined` | stage 3 success |
/// | `partial_success` | stage 3 failure |
/// | `completed` | stage 4 success or skip |
/// | `completed_with_errors` | stage 4 failure |
/// | `error` | stage 1 or 2 failure |
/// | `unknown` | deserialised foreign value, never produced by the engine |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Started,
    RequirementsParsed,
    LayoutGenerated,
    LayoutRefined,
    PartialSuccess,
    Completed,
    CompletedWithErrors,
    Error,
    Unknown,
}

impl Status {
    pub const ALL: [Status; 9] = [
        Status::Started,
        Status::RequirementsParsed,
        Status::LayoutGenerated,
        Status::LayoutRefined,
        Status::PartialSuccess,
        Status::Completed,
        Status::CompletedWithErrors,
        Status::Error,
        Status::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::RequirementsParsed => "requirements_parsed",
            Self::LayoutGenerated => "layout_generated",
            Self::LayoutRefined => "layout_refined",
            Self::PartialSuccess => "partial_success",
            Self::Completed => "completed",
            Self::CompletedWithErrors => "completed_with_errors",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Status::Unknown))
    }
}

/// A progress entry appended by a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageMessage {
    pub role: String,
    pub content: String,
}

impl StageMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Outcome of the export stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportResult {
    /// Export was not attempted because the integration is disabled.
    Skipped { message: String },
    /// Debug mode: the converted node tree, not sent anywhere.
    DebugMode { nodes: Value },
    /// Export was attempted and failed.
    Error { message: String },
}

impl ExportResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// The record threaded through the pipeline.
///
/// Stages take the state by value and hand back the next one. Errors and
/// messages only ever grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub prompt: String,
    pub parsed_requirements: Layout,
    pub layout_structure: Layout,
    pub final_layout: Layout,
    pub export_result: Option<ExportResult>,
    pub errors: Vec<String>,
    pub messages: Vec<StageMessage>,
    pub status: Status,
}

impl PipelineState {
    /// Initial state: empty mappings and lists, status `started`.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            parsed_requirements: Layout::new(),
            layout_structure: Layout::new(),
            final_layout: Layout::new(),
            export_result: None,
            errors: Vec::new(),
            messages: Vec::new(),
            status: Status::Started,
        }
    }

    /// Appends a progress message and sets the status.
    pub fn with_progress(mut self, message: impl Into<String>, status: Status) -> Self {
        self.messages.push(StageMessage::system(message));
        self.status = status;
        self
    }

    /// Appends an error, mirrors it as a progress message, and sets the status.
    pub fn with_error(mut self, error: impl Into<String>, status: Status) -> Self {
        let error = error.into();
        self.messages.push(StageMessage::system(error.clone()));
        self.errors.push(error);
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>(), Ok(status));
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
    }

    #[test]
    fn test_foreign_status_deserialises_as_unknown() {
        let status: Status = serde_json::from_value(json!("exploded")).unwrap();
        assert_eq!(status, Status::Unknown);
        assert!("exploded".parse::<Status>().is_err());
    }

    #[test]
    fn test_state_updates_append() {
        let state = PipelineState::new("p")
            .with_progress("Requirements extracted successfully.", Status::RequirementsParsed)
            .with_error("Error generating layout: boom", Status::Error);

        assert_eq!(state.status, Status::Error);
        assert_eq!(state.errors, vec!["Error generating layout: boom".to_string()]);
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].content, "Requirements extracted successfully.");
        assert_eq!(state.messages[1].role, "system");
    }

    #[test]
    fn test_export_result_shape() {
        let skipped = ExportResult::Skipped {
            message: "Figma integration not enabled".into(),
        };
        assert_eq!(
            serde_json::to_value(&skipped).unwrap(),
            json!({ "status": "skipped", "message": "Figma integration not enabled" })
        );
        assert!(!skipped.is_error());
        assert!(ExportResult::Error { message: "x".into() }.is_error());
    }
}
