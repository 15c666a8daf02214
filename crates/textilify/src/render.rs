//! Textile renderer seam and the sanitized render result.

use std::fmt;

use textilify_core::Options;

use crate::Result;

/// Renders Textile source to (unsanitized) HTML.
///
/// Implement this to plug a different Textile engine into
/// [`crate::TextilifyService`]. The output is always sanitized afterwards.
pub trait TextileRenderer: Send + Sync {
    /// Render `source` to an HTML string
    fn render(&self, source: &str) -> Result<String>;
}

/// The renderer shipped with textilify, backed by `textilify-core`
#[derive(Debug, Clone, Default)]
pub struct BuiltinRenderer {
    options: Options,
}

impl BuiltinRenderer {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl TextileRenderer for BuiltinRenderer {
    fn render(&self, source: &str) -> Result<String> {
        Ok(textilify_core::to_html(source, &self.options))
    }
}

impl<F> TextileRenderer for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn render(&self, source: &str) -> Result<String> {
        self(source)
    }
}

/// Sanitized HTML together with the Textile it was rendered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    html: String,
    source: Option<String>,
}

impl RenderOutput {
    pub(crate) fn new(html: String, source: Option<String>) -> Self {
        Self { html, source }
    }

    /// The sanitized HTML
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The Textile source, unless the service was configured not to keep it
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The sanitized HTML as a document body. Multi-line output gets the
    /// body tags on lines of their own.
    pub fn document(&self) -> String {
        if self.html.contains('\n') {
            format!("<body>\n{}\n</body>", self.html)
        } else {
            format!("<body>{}</body>", self.html)
        }
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl fmt::Display for RenderOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextilifyError;

    #[test]
    fn test_builtin_renderer() {
        let renderer = BuiltinRenderer::default();
        assert_eq!(renderer.render("h1. hello").unwrap(), "<h1>hello</h1>");
    }

    #[test]
    fn test_closure_renderer() {
        let renderer = |source: &str| -> Result<String> {
            if source.is_empty() {
                Err(TextilifyError::Render("nothing to render".to_string()))
            } else {
                Ok(format!("<p>{source}</p>"))
            }
        };
        assert_eq!(renderer.render("x").unwrap(), "<p>x</p>");
        assert!(renderer.render("").is_err());
    }

    #[test]
    fn test_render_output() {
        let output = RenderOutput::new("<p>x</p>".to_string(), Some("x".to_string()));
        assert_eq!(output.html(), "<p>x</p>");
        assert_eq!(output.source(), Some("x"));
        assert_eq!(output.to_string(), "<p>x</p>");
        assert_eq!(output.into_html(), "<p>x</p>");
    }

    #[test]
    fn test_document_form() {
        let single = RenderOutput::new("<h1>hello</h1>".to_string(), None);
        assert_eq!(single.document(), "<body><h1>hello</h1></body>");

        let multi = RenderOutput::new("<h1>hello</h1>\n<p>lol</p>".to_string(), None);
        assert_eq!(multi.document(), "<body>\n<h1>hello</h1>\n<p>lol</p>\n</body>");
    }
}
