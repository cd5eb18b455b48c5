//! Prompt Renderer - literal `{input}` substitution
//!
//! Substitution is a plain string replace: no escaping, and placeholders that
//! arrive inside the input are not expanded again. A template without the
//! placeholder renders unchanged unless strict mode is on.

use crate::error::{PlaygroundError, Result};

use super::definition::{INPUT_PLACEHOLDER, has_placeholder};

/// How to treat a template with no placeholder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Render the template unchanged
    #[default]
    Lenient,
    /// Fail with MissingPlaceholder
    Strict,
}

/// Renders prompt templates by replacing every `{input}` with the caller input
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptRenderer {
    mode: RenderMode,
}

impl PromptRenderer {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Render `template` for the prompt named `prompt_id`
    pub fn render(&self, prompt_id: &str, template: &str, input: &str) -> Result<String> {
        if self.mode == RenderMode::Strict && !has_placeholder(template) {
            return Err(PlaygroundError::MissingPlaceholder(prompt_id.to_string()));
        }
        Ok(render(template, input))
    }
}

/// Replace every occurrence of the placeholder in `template` with `input`
pub fn render(template: &str, input: &str) -> String {
    template.replace(INPUT_PLACEHOLDER, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple() {
        assert_eq!(render("Translate: {input}", "hello"), "Translate: hello");
    }

    #[test]
    fn test_render_all_occurrences() {
        let result = render("{input} and again {input}!", "echo");
        assert_eq!(result, "echo and again echo!");
    }

    #[test]
    fn test_render_without_placeholder_is_noop() {
        let template = "Say something nice.";
        assert_eq!(render(template, "ignored"), template);
    }

    #[test]
    fn test_render_not_recursive() {
        // Input containing the placeholder is inserted literally
        assert_eq!(render("Q: {input}", "{input}"), "Q: {input}");
    }

    #[test]
    fn test_render_preserves_surrounding_text() {
        let template = "Line 1\n\n  {input}\t{ other } {{input}}";
        let result = render(template, "X");
        assert_eq!(result, "Line 1\n\n  X\t{ other } {X}");
    }

    #[test]
    fn test_render_no_escaping() {
        let result = render("Code: {input}", "<script>\"x\" & 'y'</script>");
        assert_eq!(result, "Code: <script>\"x\" & 'y'</script>");
    }

    #[test]
    fn test_lenient_renderer_missing_placeholder() {
        let renderer = PromptRenderer::default();
        assert_eq!(renderer.mode(), RenderMode::Lenient);
        assert_eq!(renderer.render("p.yaml", "static", "x").unwrap(), "static");
    }

    #[test]
    fn test_strict_renderer_missing_placeholder() {
        let renderer = PromptRenderer::new(RenderMode::Strict);
        let result = renderer.render("p.yaml", "static", "x");
        assert!(matches!(result, Err(PlaygroundError::MissingPlaceholder(id)) if id == "p.yaml"));
    }

    #[test]
    fn test_strict_renderer_with_placeholder() {
        let renderer = PromptRenderer::new(RenderMode::Strict);
        assert_eq!(renderer.render("p.yaml", "Hi {input}", "Bob").unwrap(), "Hi Bob");
    }
}
