//! textilify-core - Textile AST, parsing and HTML rendering
//!
//! This crate provides the Textile side of textilify: an AST for the Textile
//! subset the converter emits, a parser from Textile source into that AST,
//! and an HTML renderer. It is the default renderer used by `textilify`.
//!
//! # Architecture
//!
//! ```text
//! Textile String ──parse──▶ ┌─────────────┐
//!                           │ Textile AST │ ──render──▶ HTML String
//!                           └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use textilify_core::{to_html, Options};
//!
//! let html = to_html("h1. Hello World\n\nSome *bold* text.", &Options::default());
//! assert_eq!(html, "<h1>Hello World</h1>\n<p>Some <strong>bold</strong> text.</p>");
//! ```

mod ast;
pub mod escape;
mod options;
mod parse;
mod render;

pub use ast::{Block, Inline, List, ListItem, Phrase};
pub use escape::{escape_attribute, escape_html};
pub use options::Options;
pub use parse::{parse, parse_inlines};
pub use render::render;

/// Parse Textile source and render it to HTML.
pub fn to_html(source: &str, options: &Options) -> String {
    render(&parse(source), options)
}
