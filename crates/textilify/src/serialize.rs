//! HTML tree to Textile serialization.
//!
//! A depth-first walk over [`Node`]s. Each element is classified once and
//! emitted according to its [`ElementRole`]. Block elements bring their own
//! surrounding newlines; collapsing the resulting blank lines is left to
//! [`crate::normalize`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::{classify, classify_tag, code_wrapper, ElementRole};
use crate::node::{Node, NodeKind};
use crate::utilities::{clean_attribute, is_formatting_whitespace};

/// Any whitespace run that spans a line break
static LINE_BREAK_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\n\s*").expect("LINE_BREAK_RUN: hardcoded regex is valid")
});

/// A line holding nothing but whitespace
static BLANK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t]*\n").expect("BLANK_LINE: hardcoded regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn marker(self) -> char {
        match self {
            ListKind::Unordered => '*',
            ListKind::Ordered => '#',
        }
    }
}

/// Walk state
#[derive(Debug, Default)]
struct Context {
    /// Enclosing lists, outermost first
    lists: Vec<ListKind>,
    /// Inside a `pre`: whitespace is content
    preformatted: bool,
    /// A `bc..` block is open and swallows plain paragraphs until a signature
    extended_code: bool,
}

impl Context {
    /// Start an explicit paragraph if a `bc..` block would otherwise absorb
    /// the content about to be written.
    fn close_extended_code(&mut self, out: &mut String) {
        if std::mem::take(&mut self.extended_code) {
            out.push_str("p. ");
        }
    }
}

/// Serialize a node and its descendants to Textile.
///
/// The result is not normalized; fragment mode returns it as is.
pub fn serialize(node: &Node) -> String {
    let mut output = String::with_capacity(256);
    serialize_node(node, &mut Context::default(), &mut output);
    output
}

fn serialize_node(node: &Node, ctx: &mut Context, out: &mut String) {
    match node.kind {
        NodeKind::Text => {
            let text = node.value.as_deref().unwrap_or_default();
            if ctx.extended_code {
                if text.trim().is_empty() {
                    return;
                }
                ctx.close_extended_code(out);
            }
            out.push_str(text);
        }
        NodeKind::Comment => {}
        NodeKind::Fragment => serialize_children(node, ctx, out),
        NodeKind::Element => serialize_element(node, ctx, out),
    }
}

/// Serialize children in order. Source formatting (whitespace with a line
/// break) is dropped where a line breaks anyway and becomes a single space
/// between inline siblings.
fn serialize_children(node: &Node, ctx: &mut Context, out: &mut String) {
    let children = &node.children;
    for (i, child) in children.iter().enumerate() {
        let formatting = child.is_text()
            && is_formatting_whitespace(child.value.as_deref().unwrap_or_default());
        if formatting && !ctx.preformatted {
            let before = i.checked_sub(1).and_then(|j| children.get(j));
            if !breaks_line(before) && !breaks_line(children.get(i + 1)) {
                out.push(' ');
            }
            continue;
        }
        serialize_node(child, ctx, out);
    }
}

/// Whether whitespace next to `sibling` sits on a line boundary. The edges
/// of the parent count as boundaries.
fn breaks_line(sibling: Option<&Node>) -> bool {
    let Some(node) = sibling else {
        return true;
    };
    node.is_element()
        && matches!(
            classify_tag(node.tag_name()),
            ElementRole::Heading(_)
                | ElementRole::Blockquote
                | ElementRole::CodeBlock
                | ElementRole::UnorderedList
                | ElementRole::OrderedList
                | ElementRole::ListItem
                | ElementRole::LineBreak
                | ElementRole::Block
        )
}

/// Serialize the children of `node` into a fresh string
fn children_to_string(node: &Node, ctx: &mut Context) -> String {
    let mut content = String::new();
    serialize_children(node, ctx, &mut content);
    content
}

fn serialize_element(node: &Node, ctx: &mut Context, out: &mut String) {
    // List items are picked up by serialize_list; one reached here is stray
    let role = classify(node, false);

    match role {
        ElementRole::Heading(level) => {
            ctx.extended_code = false;
            let content = children_to_string(node, ctx);
            out.push_str(&format!("\nh{level}. {}\n", content.trim()));
        }

        ElementRole::Blockquote => {
            ctx.extended_code = false;
            let content = children_to_string(node, ctx);
            let content = LINE_BREAK_RUN.replace_all(content.trim(), "\n");
            out.push_str("\nbq. ");
            out.push_str(&content);
            out.push('\n');
        }

        ElementRole::CodeBlock => {
            let code = code_wrapper(node).map(Node::text_content).unwrap_or_default();
            let code = code.trim_end_matches('\n');
            // A blank line would end a plain `bc.` block
            let extended = BLANK_LINE.is_match(code);
            out.push_str(if extended { "\nbc.. " } else { "\nbc. " });
            out.push_str(code);
            out.push_str("\n\n");
            ctx.extended_code = extended;
        }

        ElementRole::UnorderedList => {
            ctx.extended_code = false;
            ctx.lists.push(ListKind::Unordered);
            serialize_list(node, ctx, out);
            ctx.lists.pop();
        }

        ElementRole::OrderedList => {
            ctx.extended_code = false;
            ctx.lists.push(ListKind::Ordered);
            serialize_list(node, ctx, out);
            ctx.lists.pop();
        }

        ElementRole::Anchor => {
            ctx.close_extended_code(out);
            let content = children_to_string(node, ctx);
            let href = node.attr("href").unwrap_or_default();
            out.push_str("[\"");
            out.push_str(&content);
            if let Some(title) = clean_attribute(node.attr("title")) {
                out.push_str(" (");
                out.push_str(&title);
                out.push(')');
            }
            out.push_str("\":");
            out.push_str(href);
            out.push(']');
        }

        ElementRole::LineBreak => out.push('\n'),

        ElementRole::Block | ElementRole::ListItem => {
            let preformatted = ctx.preformatted;
            ctx.preformatted |= node.tag_name() == "pre";
            out.push('\n');
            serialize_children(node, ctx, out);
            out.push('\n');
            ctx.preformatted = preformatted;
        }

        ElementRole::Phrase(phrase) => {
            if !node.text_content().trim().is_empty() {
                ctx.close_extended_code(out);
            }
            let content = children_to_string(node, ctx);
            if content.trim().is_empty() {
                out.push_str(&content);
            } else {
                out.push_str(phrase.delimiter());
                out.push_str(&content);
                out.push_str(phrase.delimiter());
            }
        }

        ElementRole::Unknown => serialize_children(node, ctx, out),
    }
}

/// Emit one marker line per non-empty item, using the markers of every
/// enclosing list. Nested lists stay attached to their item, and an item
/// that opens with a nested list contributes no line of its own.
fn serialize_list(list: &Node, ctx: &mut Context, out: &mut String) {
    let marker: String = ctx.lists.iter().map(|kind| kind.marker()).collect();

    out.push('\n');
    for item in list.element_children() {
        if classify(item, true) != ElementRole::ListItem {
            continue;
        }

        // A blank line would end the list
        let content = children_to_string(item, ctx);
        let content = LINE_BREAK_RUN.replace_all(content.trim(), "\n");
        if content.is_empty() {
            continue;
        }

        if !opens_with_list(item) {
            out.push_str(&marker);
            out.push(' ');
        }
        out.push_str(&content);
        out.push('\n');
    }
}

/// Whether the first meaningful child of a list item is a nested list
fn opens_with_list(item: &Node) -> bool {
    item.children()
        .find(|child| child.is_element() || (child.is_text() && !child.is_blank_text()))
        .is_some_and(|child| {
            matches!(
                classify(child, false),
                ElementRole::UnorderedList | ElementRole::OrderedList
            )
        })
}
