//! Configuration options for Textile rendering

/// Options for rendering Textile to HTML
#[derive(Debug, Clone)]
pub struct Options {
    /// Render single line breaks inside a block as `<br />`.
    /// When off, the newline is kept as plain whitespace.
    pub hard_breaks: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { hard_breaks: true }
    }
}
