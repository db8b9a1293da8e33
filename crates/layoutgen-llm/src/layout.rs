//! Layout generation: description in, layout tree out.

use std::sync::Arc;

use layoutgen_core::{Layout, LayoutError};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::extract::extract_object;
use crate::TextGenerator;

/// Value of the `error` key in the mapping returned when the model's
/// output could not be parsed.
pub const LAYOUT_PARSE_ERROR: &str = "Failed to parse layout";

const LAYOUT_SYSTEM_PROMPT: &str =
    "You are a UI/UX expert specializing in creating Figma-compatible designs.";

const LAYOUT_PROMPT_TEMPLATE: &str = r##"Convert the following natural language description into a structured JSON
format that represents the described UI layout.

Requirements:
1. The layout should be hierarchical, with parent and child components
2. Include appropriate styling information (colors, spacing, fonts)
3. Use standard Figma component terminology where possible: FRAME, TEXT, RECTANGLE, ELLIPSE, GROUP, COMPONENT, INSTANCE
4. Format must be valid JSON that can be parsed programmatically

DESCRIPTION:
{description}

OUTPUT FORMAT EXAMPLE:
```json
{
  "name": "Dashboard Layout",
  "type": "FRAME",
  "width": 1440,
  "height": 900,
  "backgroundColor": "#FFFFFF",
  "children": [
    {
      "name": "Sidebar",
      "type": "RECTANGLE",
      "x": 0,
      "y": 0,
      "width": 250,
      "height": 900,
      "backgroundColor": "#F5F5F5",
      "children": []
    },
    {
      "name": "Content Area",
      "type": "FRAME",
      "x": 250,
      "y": 0,
      "width": 1190,
      "height": 900,
      "backgroundColor": "#FFFFFF",
      "children": []
    }
  ]
}
```

Respond with only the JSON, no explanations or other text."##;

/// Builds the user prompt for a layout description.
pub(crate) fn layout_prompt(description: &str) -> String {
    LAYOUT_PROMPT_TEMPLATE.replace("{description}", description.trim())
}

/// Turns natural-language descriptions into layout trees.
///
/// Parse failures do not raise: the returned mapping carries `error` and
/// `message` keys instead, so callers must check for an `error` key.
/// Model-call failures are returned as `Err`.
#[derive(Clone)]
pub struct LayoutGenerator {
    llm: Arc<dyn TextGenerator>,
}

impl LayoutGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Generates a layout mapping for the given description.
    pub async fn generate_layout(&self, description: &str) -> Result<Layout, LayoutError> {
        info!("║     → Generating layout with {}", self.llm.model());
        let response = self
            .llm
            .complete(LAYOUT_SYSTEM_PROMPT, &layout_prompt(description))
            .await?;

        match extract_object(&response.content) {
            Ok(layout) => {
                info!("║     ← Layout: {} top-level keys", layout.len());
                Ok(layout)
            }
            Err(e) => {
                warn!("║     ⚠ Error parsing JSON response: {}", e);
                debug!("Raw content: {}", response.content);
                let mut error = Layout::new();
                error.insert("error".into(), Value::String(LAYOUT_PARSE_ERROR.into()));
                error.insert("message".into(), Value::String(e.to_string()));
                Ok(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LlmResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct Canned {
        reply: Result<String, LayoutError>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl Canned {
        fn new(reply: Result<&str, LayoutError>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(String::from),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn complete(&self, system_prompt: &str, user_input: &str) -> Result<LlmResponse, LayoutError> {
            self.seen
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_input.to_string()));
            self.reply.clone().map(LlmResponse::text)
        }

        fn model(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn test_generate_layout_parses_fenced_output() {
        let llm = Canned::new(Ok("```json\n{\"name\": \"Login\", \"type\": \"FRAME\"}\n```"));
        let generator = LayoutGenerator::new(llm.clone());

        let layout = generator.generate_layout("a simple login form").await.unwrap();
        assert_eq!(layout.get("name"), Some(&json!("Login")));

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, LAYOUT_SYSTEM_PROMPT);
        assert!(seen[0].1.contains("DESCRIPTION:\na simple login form\n"));
        assert!(seen[0].1.contains("Respond with only the JSON"));
    }

    #[tokio::test]
    async fn test_parse_failure_returns_error_mapping() {
        let generator = LayoutGenerator::new(Canned::new(Ok("Sorry, I can't do layouts.")));

        let layout = generator.generate_layout("anything").await.unwrap();
        assert_eq!(layout.get("error"), Some(&json!(LAYOUT_PARSE_ERROR)));
        assert!(layout.get("message").and_then(Value::as_str).is_some());
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let generator = LayoutGenerator::new(Canned::new(Err(LayoutError::Llm("timeout".into()))));

        let err = generator.generate_layout("anything").await.unwrap_err();
        assert_eq!(err, LayoutError::Llm("timeout".into()));
    }

    #[test]
    fn test_layout_prompt_keeps_example_braces() {
        let prompt = layout_prompt("  a dashboard ");
        assert!(prompt.contains("DESCRIPTION:\na dashboard\n"));
        assert!(prompt.contains("\"name\": \"Dashboard Layout\""));
    }

    #[test]
    fn test_worked_example_is_a_valid_layout() {
        let example = extract_object(&layout_prompt("a dashboard")).unwrap();

        assert_eq!(example["backgroundColor"], "#FFFFFF");
        assert_eq!(example["children"][0]["backgroundColor"], "#F5F5F5");
        assert_eq!(example["children"][1]["name"], "Content Area");
        assert!(LAYOUT_PROMPT_TEMPLATE.ends_with("no explanations or other text."));
    }
}
