//! Escaping for literal display of text and rejected markup.

use crate::node::Node;

pub use textilify_core::escape::{escape_attribute, escape_html as escape_text};

/// Render a rejected element, content and closing tag included, as inert
/// literal text.
///
/// ```rust
/// use textilify::{escape_unsafe, Node};
///
/// let mut script = Node::element("script");
/// script.add_child(Node::text("alert('ohai!');"));
/// assert_eq!(
///     escape_unsafe(&script),
///     "&lt;script&gt;alert('ohai!');&lt;/script&gt;"
/// );
/// ```
pub fn escape_unsafe(node: &Node) -> String {
    escape_text(&node.outer_html())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_unsafe_keeps_content() {
        let mut tag = Node::element("xyzzy");
        tag.add_child(Node::text("Adventure!"));
        assert_eq!(escape_unsafe(&tag), "&lt;xyzzy&gt;Adventure!&lt;/xyzzy&gt;");
    }

    #[test]
    fn test_escape_unsafe_nested_markup_is_literal() {
        let mut tag = Node::element_with_attrs("blink", vec![("class", "x")]);
        let mut bold = Node::element("b");
        bold.add_child(Node::text("a & b"));
        tag.add_child(bold);
        assert_eq!(
            escape_unsafe(&tag),
            "&lt;blink class=\"x\"&gt;&lt;b&gt;a &amp;amp; b&lt;/b&gt;&lt;/blink&gt;"
        );
    }

    #[test]
    fn test_escape_unsafe_void_element() {
        let embed = Node::element_with_attrs("embed", vec![("src", "x.swf")]);
        assert_eq!(escape_unsafe(&embed), "&lt;embed src=\"x.swf\" /&gt;");
    }
}
