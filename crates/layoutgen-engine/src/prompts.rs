pub const REQUIREMENTS_SYSTEM_PROMPT: &str =
    "You are an expert UI/UX designer. Extract structured requirements from the user's prompt.";

const REQUIREMENTS_PROMPT: &str = r#"Extract the key UI requirements from this description. Focus on:
1. Layout type (dashboard, form, landing page, etc.)
2. Key components needed
3. Style preferences (colors, themes)
4. Responsive design requirements
5. Any specific functionality mentioned

USER PROMPT: {prompt}

Format your response as JSON with appropriate keys and values."#;

pub const REFINE_SYSTEM_PROMPT: &str =
    "You are an expert Figma designer. Check and refine the layout to ensure Figma compatibility.";

const REFINE_PROMPT: &str = r#"Check this UI layout structure for Figma compatibility:

```json
{layout}
```

Make sure it:
1. Uses correct Figma component types (FRAME, TEXT, RECTANGLE, etc.)
2. Has all required properties for each component type
3. Has valid color values, positions, and dimensions
4. Maintains proper parent-child relationships

Return the refined JSON structure only. If no changes are needed, return the original."#;

pub fn requirements_prompt(prompt: &str) -> String {
    REQUIREMENTS_PROMPT.replace("{prompt}", prompt)
}

pub fn refine_prompt(layout_json: &str) -> String {
    REFINE_PROMPT.replace("{layout}", layout_json)
}

pub fn layout_request(prompt: &str, requirements: &str) -> String {
    format!(
        "{}\n\nBased on these requirements:\n{}\n\nCreate a detailed UI layout that satisfies all requirements.",
        prompt.trim(),
        requirements
    )
}
