//! TextilifyService - the main entry point for converting between Textile and HTML.

use std::io::Read;

use indexmap::IndexSet;
use textilify_core::Options;

use crate::html::{parse_html, Mode};
use crate::node::Node;
use crate::normalize::normalize;
use crate::render::{BuiltinRenderer, RenderOutput, TextileRenderer};
use crate::sanitize::{
    sanitize, DEFAULT_ALLOWED_ATTRIBUTES, DEFAULT_ALLOWED_SCHEMES, DEFAULT_ALLOWED_TAGS,
};
use crate::serialize::serialize;
use crate::Result;

/// Options for TextilifyService
#[derive(Debug, Clone)]
pub struct TextilifyOptions {
    /// Elements kept as markup when sanitizing rendered HTML
    pub allowed_tags: IndexSet<String>,

    /// Attributes kept on allowed elements
    pub allowed_attributes: IndexSet<String>,

    /// URL schemes accepted in `href`, `src` and `cite`
    pub allowed_schemes: IndexSet<String>,

    /// Keep the Textile source in [`RenderOutput`]
    pub keep_source: bool,

    /// Options for the built-in renderer
    pub render: Options,
}

impl Default for TextilifyOptions {
    fn default() -> Self {
        Self {
            allowed_tags: to_set(DEFAULT_ALLOWED_TAGS),
            allowed_attributes: to_set(DEFAULT_ALLOWED_ATTRIBUTES),
            allowed_schemes: to_set(DEFAULT_ALLOWED_SCHEMES),
            keep_source: true,
            render: Options::default(),
        }
    }
}

fn to_set(values: &[&str]) -> IndexSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// The main service for converting between Textile and HTML
pub struct TextilifyService {
    options: TextilifyOptions,
    renderer: Box<dyn TextileRenderer>,
}

impl TextilifyService {
    /// Create a new TextilifyService with default options
    pub fn new() -> Self {
        Self::with_options(TextilifyOptions::default())
    }

    /// Create a TextilifyService with custom options
    pub fn with_options(options: TextilifyOptions) -> Self {
        let renderer = Box::new(BuiltinRenderer::new(options.render.clone()));
        Self { options, renderer }
    }

    /// Replace the Textile renderer
    pub fn with_renderer<R>(mut self, renderer: R) -> Self
    where
        R: TextileRenderer + 'static,
    {
        self.renderer = Box::new(renderer);
        self
    }

    /// Convert HTML to Textile
    pub fn to_textile(&self, html: &str, mode: Mode) -> String {
        log::debug!("converting {} bytes of HTML to textile ({mode:?})", html.len());
        self.node_to_textile(&parse_html(html, mode), mode)
    }

    /// Convert an already parsed node tree to Textile.
    ///
    /// In [`Mode::Document`] the node is wrapped in an implicit block and the
    /// result is normalized.
    pub fn node_to_textile(&self, node: &Node, mode: Mode) -> String {
        match mode {
            Mode::Fragment => serialize(node),
            Mode::Document => {
                // The implicit root behaves like a div around the content
                normalize(&format!("\n{}\n", serialize(node)))
            }
        }
    }

    /// Render Textile to sanitized HTML
    pub fn to_html(&self, textile: &str) -> Result<RenderOutput> {
        log::debug!("rendering {} bytes of textile", textile.len());
        let html = self.renderer.render(textile)?;
        let source = self.options.keep_source.then(|| textile.to_string());
        Ok(RenderOutput::new(self.sanitize(&html), source))
    }

    /// Read HTML from `reader` and convert it to Textile
    pub fn read_html<R: Read>(&self, mut reader: R, mode: Mode) -> Result<String> {
        let mut html = String::new();
        reader.read_to_string(&mut html)?;
        Ok(self.to_textile(&html, mode))
    }

    /// Read Textile from `reader` and render it to sanitized HTML
    pub fn read_textile<R: Read>(&self, mut reader: R) -> Result<RenderOutput> {
        let mut textile = String::new();
        reader.read_to_string(&mut textile)?;
        self.to_html(&textile)
    }

    /// Sanitize an HTML fragment with this service's allow-lists
    pub fn sanitize(&self, html: &str) -> String {
        sanitize(html, &self.options)
    }

    /// Get the current options
    pub fn options(&self) -> &TextilifyOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut TextilifyOptions {
        &mut self.options
    }
}

impl Default for TextilifyService {
    fn default() -> Self {
        Self::new()
    }
}
