//! HTML node tree consumed by the Textile serializer.
//!
//! Any parser can build this structure; [`crate::html::parse_html`] builds it
//! from scraper's html5ever tree. Element names are stored lower-cased and
//! attributes keep their source order.

use indexmap::IndexMap;

use crate::escape::{escape_attribute, escape_text};
use crate::utilities::{is_raw_text, is_void};

/// Node kinds the serializer distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Element node
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Container for a parsed node list (fragment or document body)
    Fragment,
}

/// A node in the HTML tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node kind
    pub kind: NodeKind,

    /// Lower-cased tag name for elements, `#text`, `#comment` or `#fragment` otherwise
    pub name: String,

    /// Text of text and comment nodes
    pub value: Option<String>,

    /// Element attributes in source order
    pub attributes: IndexMap<String, String>,

    /// Child nodes
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            kind: NodeKind::Element,
            name: tag_name.to_lowercase(),
            value: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            name: "#text".to_string(),
            value: Some(content.to_string()),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self {
            kind: NodeKind::Comment,
            name: "#comment".to_string(),
            value: Some(content.to_string()),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a fragment holding `children`
    pub fn fragment(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Fragment,
            name: "#fragment".to_string(),
            value: None,
            attributes: IndexMap::new(),
            children,
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Get the tag name (lowercase). Empty for non-element nodes.
    pub fn tag_name(&self) -> &str {
        if self.is_element() {
            &self.name
        } else {
            ""
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name.to_lowercase().as_str())
            .map(String::as_str)
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Check if this is a text node holding only whitespace
    pub fn is_blank_text(&self) -> bool {
        self.is_text() && self.value.as_deref().unwrap_or_default().trim().is_empty()
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.kind {
            NodeKind::Text => self.value.clone().unwrap_or_default(),
            NodeKind::Comment => String::new(),
            _ => self.children().map(Node::text_content).collect(),
        }
    }

    /// Reconstruct outer HTML
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, false);
        out
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            child.write_html(&mut out, is_raw_text(self.tag_name()));
        }
        out
    }

    fn write_html(&self, out: &mut String, raw_text: bool) {
        match self.kind {
            NodeKind::Text => {
                let text = self.value.as_deref().unwrap_or_default();
                if raw_text {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            NodeKind::Comment => {
                out.push_str("<!--");
                out.push_str(self.value.as_deref().unwrap_or_default());
                out.push_str("-->");
            }
            NodeKind::Fragment => out.push_str(&self.inner_html()),
            NodeKind::Element => {
                write_start_tag(out, &self.name, self.attributes.iter());
                if !is_void(&self.name) {
                    out.push_str(&self.inner_html());
                    out.push_str("</");
                    out.push_str(&self.name);
                    out.push('>');
                }
            }
        }
    }
}

/// Write an opening tag; void elements get the self-closing ` />` form.
pub(crate) fn write_start_tag<'a>(
    out: &mut String,
    tag: &str,
    attrs: impl Iterator<Item = (&'a String, &'a String)>,
) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    if is_void(tag) {
        out.push_str(" />");
    } else {
        out.push('>');
    }
}
