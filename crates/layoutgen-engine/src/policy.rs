//! Per-stage outcome policy.
//!
//! | Stage | Success status | Failure status | On failure |
//! |-------|----------------|----------------|------------|
//! | `ParseRequirements` | `requirements_parsed` | `error` | requirements keep their prior value |
//! | `GenerateLayout` | `layout_generated` | `error` | layout keeps its prior value |
//! | `RefineLayout` | `layout_refined` | `partial_success` | final layout = unrefined layout |
//! | `Export` | `completed` | `completed_with_errors` | export result carries the error |
//!
//! Every failure appends one error and one message and the pipeline moves on.

use layoutgen_core::Status;

/// One of the four pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ParseRequirements,
    GenerateLayout,
    RefineLayout,
    Export,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::ParseRequirements,
        Stage::GenerateLayout,
        Stage::RefineLayout,
        Stage::Export,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ParseRequirements => "parse_requirements",
            Self::GenerateLayout => "generate_layout",
            Self::RefineLayout => "refine_layout",
            Self::Export => "export_to_figma",
        }
    }

    pub fn success_status(&self) -> Status {
        match self {
            Self::ParseRequirements => Status::RequirementsParsed,
            Self::GenerateLayout => Status::LayoutGenerated,
            Self::RefineLayout => Status::LayoutRefined,
            Self::Export => Status::Completed,
        }
    }

    pub fn failure_status(&self) -> Status {
        match self {
            Self::ParseRequirements | Self::GenerateLayout => Status::Error,
            Self::RefineLayout => Status::PartialSuccess,
            Self::Export => Status::CompletedWithErrors,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::ParseRequirements => "Requirements extracted successfully.",
            Self::GenerateLayout => "UI layout structure generated.",
            Self::RefineLayout => "UI layout refined for Figma compatibility.",
            Self::Export => "Figma frame prepared (debug mode, nothing sent).",
        }
    }

    /// Formats a stage fault for the state's error list.
    pub fn error_message(&self, cause: impl std::fmt::Display) -> String {
        let action = match self {
            Self::ParseRequirements => "parsing requirements",
            Self::GenerateLayout => "generating layout",
            Self::RefineLayout => "refining layout",
            Self::Export => "exporting to Figma",
        };
        format!("Error {}: {}", action, cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        let table: Vec<_> = Stage::ALL
            .iter()
            .map(|s| (s.name(), s.success_status(), s.failure_status()))
            .collect();

        assert_eq!(
            table,
            vec![
                ("parse_requirements", Status::RequirementsParsed, Status::Error),
                ("generate_layout", Status::LayoutGenerated, Status::Error),
                ("refine_layout", Status::LayoutRefined, Status::PartialSuccess),
                ("export_to_figma", Status::Completed, Status::CompletedWithErrors),
            ]
        );
    }

    #[test]
    fn test_error_message_format() {
        assert_eq!(
            Stage::ParseRequirements.error_message("LLM request failed: timeout"),
            "Error parsing requirements: LLM request failed: timeout"
        );
        assert_eq!(
            Stage::Export.error_message("Figma integration not enabled"),
            "Error exporting to Figma: Figma integration not enabled"
        );
    }
}
