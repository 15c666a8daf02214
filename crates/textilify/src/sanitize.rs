//! Allow-list sanitization of rendered HTML.
//!
//! Rendered HTML is re-parsed and written back element by element. Allowed
//! elements keep their allowed attributes; anything else is replaced by its
//! escaped source so it shows up as literal text instead of being executed
//! or silently dropped.

use crate::escape::{escape_text, escape_unsafe};
use crate::html::{parse_html, Mode};
use crate::node::{write_start_tag, Node, NodeKind};
use crate::service::TextilifyOptions;
use crate::utilities::is_void;

/// Elements the sanitizer writes back as markup
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "blockquote", "br", "caption", "cite", "code",
    "dd", "del", "div", "dl", "dt", "em", "h1", "h2", "h3", "h4", "h5", "h6",
    "hr", "i", "img", "ins", "li", "ol", "p", "pre", "q", "span", "strong",
    "sub", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "u",
    "ul",
];

/// Attributes kept on allowed elements
pub const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &[
    "alt", "cite", "class", "colspan", "href", "id", "lang", "rowspan", "src",
    "start", "title",
];

/// URL schemes accepted in URL-valued attributes. Relative URLs always pass.
pub const DEFAULT_ALLOWED_SCHEMES: &[&str] = &["ftp", "http", "https", "mailto"];

/// Attributes whose value is a URL
const URL_ATTRIBUTES: &[&str] = &["cite", "href", "src"];

/// Sanitize an HTML fragment against the allow-lists in `options`.
pub fn sanitize(html: &str, options: &TextilifyOptions) -> String {
    let fragment = parse_html(html, Mode::Fragment);
    let mut output = String::with_capacity(html.len());
    write_node(&fragment, options, &mut output);
    output
}

fn write_node(node: &Node, options: &TextilifyOptions, out: &mut String) {
    match node.kind {
        NodeKind::Text => out.push_str(&escape_text(node.value.as_deref().unwrap_or_default())),
        NodeKind::Comment => {}
        NodeKind::Fragment => write_children(node, options, out),
        NodeKind::Element => {
            let tag = node.tag_name();
            if !options.allowed_tags.contains(tag) {
                log::debug!("escaping disallowed element <{tag}>");
                out.push_str(&escape_unsafe(node));
                return;
            }

            let attrs = node
                .attributes
                .iter()
                .filter(|(name, value)| allowed_attribute(name, value, options));
            write_start_tag(out, tag, attrs);

            if !is_void(tag) {
                write_children(node, options, out);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn write_children(node: &Node, options: &TextilifyOptions, out: &mut String) {
    for child in node.children() {
        write_node(child, options, out);
    }
}

fn allowed_attribute(name: &str, value: &str, options: &TextilifyOptions) -> bool {
    if !options.allowed_attributes.contains(name) {
        log::trace!("dropping attribute {name}");
        return false;
    }
    if URL_ATTRIBUTES.contains(&name) && !allowed_url(value, options) {
        log::debug!("dropping {name} with disallowed scheme: {value}");
        return false;
    }
    true
}

/// Check the scheme of a URL. Relative URLs have none and are accepted.
fn allowed_url(value: &str, options: &TextilifyOptions) -> bool {
    let value = value.trim();
    match value.find(':') {
        Some(colon) if !value[..colon].contains(['/', '?', '#']) => {
            // Browsers ignore whitespace and control characters inside the scheme
            let scheme: String = value[..colon]
                .chars()
                .filter(|c| !c.is_whitespace() && !c.is_control())
                .collect::<String>()
                .to_lowercase();
            options.allowed_schemes.contains(scheme.as_str())
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        sanitize(html, &TextilifyOptions::default())
    }

    #[test]
    fn test_allowed_markup_is_unchanged() {
        let html = "<blockquote>\n<p>foo fazz<br />\nbizz buzz</p>\n</blockquote>";
        assert_eq!(clean(html), html);

        let list = "<ul>\n\t<li>foo</li>\n\t<li>wuxx</li>\n</ul>";
        assert_eq!(clean(list), list);
    }

    #[test]
    fn test_script_is_escaped() {
        assert_eq!(
            clean("<h1>hello</h1>\n<script>alert('ohai!');</script>\n<p>lol</p>"),
            "<h1>hello</h1>\n&lt;script&gt;alert('ohai!');&lt;/script&gt;\n<p>lol</p>"
        );
    }

    #[test]
    fn test_unknown_tag_is_escaped() {
        assert_eq!(
            clean("<xyzzy>Adventure!</xyzzy>"),
            "&lt;xyzzy&gt;Adventure!&lt;/xyzzy&gt;"
        );
    }

    #[test]
    fn test_disallowed_inside_allowed() {
        assert_eq!(
            clean("<p>a <iframe src=\"x\"></iframe> b</p>"),
            "<p>a &lt;iframe src=\"x\"&gt;&lt;/iframe&gt; b</p>"
        );
    }

    #[test]
    fn test_event_handlers_are_dropped() {
        assert_eq!(
            clean("<p onclick=\"steal()\" class=\"x\">hi</p>"),
            "<p class=\"x\">hi</p>"
        );
    }

    #[test]
    fn test_javascript_urls_are_dropped() {
        assert_eq!(clean("<a href=\"javascript:alert(1)\">x</a>"), "<a>x</a>");
        assert_eq!(clean("<a href=\"JaVa\tScript:alert(1)\">x</a>"), "<a>x</a>");
        assert_eq!(
            clean("<a href=\"http://sample.com/\" title=\"Fudd\">x</a>"),
            "<a href=\"http://sample.com/\" title=\"Fudd\">x</a>"
        );
        assert_eq!(clean("<a href=\"/a:b\">x</a>"), "<a href=\"/a:b\">x</a>");
    }

    #[test]
    fn test_text_is_reescaped_and_comments_dropped() {
        assert_eq!(clean("<p>a &lt; b &amp; c<!-- x --></p>"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_custom_allow_list() {
        let mut options = TextilifyOptions::default();
        options.allowed_tags.shift_remove("h1");
        assert_eq!(
            sanitize("<h1>x</h1>", &options),
            "&lt;h1&gt;x&lt;/h1&gt;"
        );
    }
}
