//! HTML parsing support.
//!
//! Parses HTML strings with scraper (html5ever) and converts the result into
//! the [`Node`] tree the serializer walks. html5ever repairs malformed
//! markup and decodes entities, so the tree is always well formed.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// How an HTML string is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Parse as a body fragment and serialize the nodes as they are
    #[default]
    Fragment,
    /// Parse as a full document, serialize the body and normalize whitespace
    Document,
}

/// Parse an HTML string into a [`Node`] fragment.
///
/// In [`Mode::Fragment`] the fragment holds the parsed nodes; in
/// [`Mode::Document`] it holds the children of `<body>`.
///
/// # Example
///
/// ```rust
/// use textilify::{parse_html, Mode};
///
/// let fragment = parse_html("<h1>Hello <em>World</em></h1>", Mode::Fragment);
/// assert_eq!(fragment.children[0].tag_name(), "h1");
/// ```
pub fn parse_html(html: &str, mode: Mode) -> Node {
    match mode {
        Mode::Fragment => {
            let document = Html::parse_fragment(html);
            Node::fragment(convert_children(document.root_element()))
        }
        Mode::Document => {
            let document = Html::parse_document(html);
            let body = document
                .root_element()
                .children()
                .filter_map(ElementRef::wrap)
                .find(|element| element.value().name() == "body");
            Node::fragment(body.map(convert_children).unwrap_or_default())
        }
    }
}

fn convert_children(element: ElementRef) -> Vec<Node> {
    let mut children = Vec::new();

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => children.push(Node::text(&text.text)),
            ScraperNode::Comment(comment) => children.push(Node::comment(&comment.comment)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    children.push(convert_element(child_element));
                }
            }
            _ => {}
        }
    }

    children
}

/// Convert a scraper ElementRef to our Node structure
fn convert_element(element: ElementRef) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), attrs);
    node.children = convert_children(element);
    node
}
