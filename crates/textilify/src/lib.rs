//! # textilify
//!
//! Convert between Textile markup and sanitized HTML.
//!
//! ## Design
//!
//! The HTML to Textile direction parses HTML with scraper (html5ever) into a
//! small [`Node`] tree and walks it, emitting Textile for a fixed set of
//! elements: headings, blockquotes, code blocks, lists, phrase elements,
//! links and line breaks. Any other element is transparent: its content is
//! kept, its tag is not.
//!
//! The Textile to HTML direction goes through a [`TextileRenderer`] (by
//! default the one in `textilify-core`) and then through an allow-list
//! sanitizer. Disallowed elements such as `<script>` come out as escaped,
//! inert text.
//!
//! ## Example (HTML to Textile)
//!
//! ```rust
//! use textilify::{to_textile, Mode};
//!
//! assert_eq!(to_textile("<h1>Foo</h1>", Mode::Fragment), "\nh1. Foo\n");
//! assert_eq!(
//!     to_textile("<ul><li>one</li><li></li><li>three</li></ul>", Mode::Fragment),
//!     "\n* one\n* three\n"
//! );
//! ```
//!
//! ## Example (Textile to HTML)
//!
//! ```rust
//! use textilify::to_html;
//!
//! let output = to_html("h1. hello\n\n<script>alert('ohai!');</script>").unwrap();
//! assert_eq!(
//!     output.html(),
//!     "<h1>hello</h1>\n&lt;script&gt;alert('ohai!');&lt;/script&gt;"
//! );
//! ```

pub mod classify;
pub mod escape;
pub mod html;
pub mod node;
mod normalize;
mod render;
mod sanitize;
mod serialize;
mod service;
mod utilities;

pub use classify::{classify, classify_tag, ElementRole, PhraseRole};
pub use escape::{escape_attribute, escape_text, escape_unsafe};
pub use html::{parse_html, Mode};
pub use node::{Node, NodeKind};
pub use normalize::normalize;
pub use render::{BuiltinRenderer, RenderOutput, TextileRenderer};
pub use sanitize::{DEFAULT_ALLOWED_ATTRIBUTES, DEFAULT_ALLOWED_SCHEMES, DEFAULT_ALLOWED_TAGS};
pub use serialize::serialize;
pub use service::{TextilifyOptions, TextilifyService};

/// Error type for textilify operations
#[derive(Debug, thiserror::Error)]
pub enum TextilifyError {
    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TextilifyError>;

/// Convert HTML to Textile with the default service.
pub fn to_textile(html: &str, mode: Mode) -> String {
    TextilifyService::new().to_textile(html, mode)
}

/// Render Textile to sanitized HTML with the default service.
pub fn to_html(textile: &str) -> Result<RenderOutput> {
    TextilifyService::new().to_html(textile)
}
