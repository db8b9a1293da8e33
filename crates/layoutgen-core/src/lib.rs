//! Core domain types and error definitions for layoutgen.
//!
//! This crate provides the types shared by every stage of the pipeline:
//!
//! - [`LayoutError`] — Error type for model calls, parsing and export
//! - [`PipelineState`] — The record threaded through the four stages
//! - [`Status`] — Where a pipeline run ended up
//! - [`StageMessage`] — Human-readable progress entries
//! - [`LayoutNode`] — Typed view of one element of a layout tree
//! - [`ExportResult`] — Outcome of the design-tool export stage
//!
//! # Example
//!
//! ```rust
//! use layoutgen_core::{PipelineState, Status};
//!
//! let state = PipelineState::new("a simple login form");
//! assert_eq!(state.status, Status::Started);
//! assert!(state.parsed_requirements.is_empty());
//!
//! let state = state.with_error("Error parsing requirements: timeout", Status::Error);
//! assert_eq!(state.errors.len(), 1);
//! assert_eq!(state.messages.len(), 1);
//! ```

mod layout;
mod state;

pub use layout::{Layout, LayoutNode};
pub use state::{ExportResult, PipelineState, StageMessage, Status};

use thiserror::Error;

/// Errors raised by model calls, output parsing and design-tool export.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// LLM API request failed.
    #[error("LLM request failed: {0}")]
    Llm(String),

    /// Model output did not contain the expected JSON.
    #[error("Failed to parse model output: {0}")]
    Parse(String),

    /// Export was requested without a Figma access token.
    #[error("Figma integration not enabled")]
    ExportDisabled,

    /// Export path that has no implementation outside debug mode.
    #[error("{0}")]
    Unsupported(&'static str),

    /// A background colour that is not `#RRGGBB`.
    #[error("Invalid color '{0}': expected a 6-digit hex value")]
    InvalidColor(String),

    /// A layout tree whose fields have the wrong shape.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Figma REST call failed.
    #[error("{0}")]
    DesignTool(String),
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Parse(err.to_string())
    }
}
