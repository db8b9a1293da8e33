//! Result rendering for the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use layoutgen::GenerationSummary;

pub struct OutputOptions {
    pub json: bool,
    pub output: Option<PathBuf>,
}

/// Saves the summary to the output file if one is set, otherwise prints it.
pub fn emit(summary: &GenerationSummary, opts: &OutputOptions) -> Result<()> {
    match &opts.output {
        Some(path) => {
            save(summary, path)?;
            println!("Result saved to {}", path.display());
        }
        None => println!("{}", render(summary, opts.json)?),
    }
    Ok(())
}

fn save(summary: &GenerationSummary, path: &Path) -> Result<()> {
    let pretty = serde_json::to_string_pretty(summary)?;
    fs::write(path, pretty).with_context(|| format!("writing {}", path.display()))
}

pub fn render(summary: &GenerationSummary, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(summary)?);
    }

    let mut out = format!(
        "\nGENERATED LAYOUT:\n{}",
        serde_json::to_string_pretty(&summary.layout)?
    );
    if !summary.errors.is_empty() {
        out.push_str("\n\nERRORS:");
        for error in &summary.errors {
            out.push_str(&format!("\n- {}", error));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoutgen::{Layout, Status};
    use serde_json::json;

    fn summary(errors: Vec<&str>) -> GenerationSummary {
        let layout: Layout = serde_json::from_value(json!({ "name": "Login" })).unwrap();
        GenerationSummary {
            status: Status::PartialSuccess,
            layout,
            figma_response: None,
            errors: errors.into_iter().map(String::from).collect(),
            messages: vec![],
        }
    }

    #[test]
    fn test_render_plain() {
        let text = render(&summary(vec![]), false).unwrap();
        assert!(text.contains("GENERATED LAYOUT:\n{\n  \"name\": \"Login\"\n}"));
        assert!(!text.contains("ERRORS:"));
    }

    #[test]
    fn test_render_plain_with_errors() {
        let text = render(&summary(vec!["Error refining layout: boom"]), false).unwrap();
        assert!(text.ends_with("ERRORS:\n- Error refining layout: boom"));
    }

    #[test]
    fn test_render_json() {
        let text = render(&summary(vec![]), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"], "partial_success");
        assert_eq!(value["layout"]["name"], "Login");
        assert_eq!(value["figma_response"], serde_json::Value::Null);
    }

    #[test]
    fn test_emit_writes_output_file() {
        let path = std::env::temp_dir().join(format!("layoutgen-emit-{}.json", std::process::id()));
        let opts = OutputOptions {
            json: false,
            output: Some(path.clone()),
        };
        let expected = summary(vec!["Error refining layout: boom"]);

        emit(&expected, &opts).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(written, serde_json::to_string_pretty(&expected).unwrap());
        let saved: GenerationSummary = serde_json::from_str(&written).unwrap();
        assert_eq!(saved, expected);
    }

    #[test]
    fn test_emit_reports_unwritable_path() {
        let opts = OutputOptions {
            json: true,
            output: Some(std::env::temp_dir().join("layoutgen-missing-dir").join("out.json")),
        };
        let err = emit(&summary(vec![]), &opts).unwrap_err();
        assert!(format!("{:#}", err).starts_with("writing "));
    }
}
