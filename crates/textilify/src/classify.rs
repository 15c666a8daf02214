//! Element classification.
//!
//! Every tag maps to one [`ElementRole`] through a single immutable table.
//! [`classify`] then refines the table's answer with the element's structure:
//! anchors need an `href`, code blocks need their `code` wrapper and list
//! items need a list around them.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use textilify_core::Phrase;

use crate::node::Node;

/// How the serializer treats an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// `h1`..`h4`
    Heading(u8),
    Blockquote,
    /// `pre` wrapping a single `code`
    CodeBlock,
    UnorderedList,
    OrderedList,
    ListItem,
    /// `a` with an `href`
    Anchor,
    LineBreak,
    /// `p`, `div` and the structural fallbacks
    Block,
    /// Inline emphasis-equivalent elements
    Phrase(PhraseRole),
    /// Contributes no markup; children are still serialized
    Unknown,
}

/// Inline roles. Everything but `code` is a Textile phrase modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseRole {
    Modifier(Phrase),
    Code,
}

impl PhraseRole {
    /// The delimiter written on both sides of the content
    pub fn delimiter(self) -> &'static str {
        match self {
            PhraseRole::Modifier(phrase) => phrase.delimiter(),
            PhraseRole::Code => "@",
        }
    }
}

static TAG_ROLES: Lazy<IndexMap<&'static str, ElementRole>> = Lazy::new(|| {
    let mut roles = IndexMap::new();
    roles.insert("h1", ElementRole::Heading(1));
    roles.insert("h2", ElementRole::Heading(2));
    roles.insert("h3", ElementRole::Heading(3));
    roles.insert("h4", ElementRole::Heading(4));
    roles.insert("blockquote", ElementRole::Blockquote);
    roles.insert("pre", ElementRole::CodeBlock);
    roles.insert("ul", ElementRole::UnorderedList);
    roles.insert("ol", ElementRole::OrderedList);
    roles.insert("li", ElementRole::ListItem);
    roles.insert("a", ElementRole::Anchor);
    roles.insert("br", ElementRole::LineBreak);
    roles.insert("p", ElementRole::Block);
    roles.insert("div", ElementRole::Block);
    roles.insert("code", ElementRole::Phrase(PhraseRole::Code));
    for phrase in Phrase::ALL {
        roles.insert(phrase.tag(), ElementRole::Phrase(PhraseRole::Modifier(phrase)));
    }
    roles
});

/// Classify a tag name. Case insensitive; unrecognised tags are
/// [`ElementRole::Unknown`].
pub fn classify_tag(tag: &str) -> ElementRole {
    let tag = tag.to_lowercase();
    TAG_ROLES
        .get(tag.as_str())
        .copied()
        .unwrap_or(ElementRole::Unknown)
}

/// Classify an element node, taking its attributes and children into account.
///
/// `in_list` tells whether the node sits directly inside a `ul` or `ol`.
/// Non-element nodes are [`ElementRole::Unknown`].
pub fn classify(node: &Node, in_list: bool) -> ElementRole {
    if !node.is_element() {
        return ElementRole::Unknown;
    }

    match classify_tag(node.tag_name()) {
        ElementRole::Anchor if !node.has_attr("href") => ElementRole::Unknown,
        ElementRole::CodeBlock if code_wrapper(node).is_none() => ElementRole::Block,
        ElementRole::ListItem if !in_list => ElementRole::Block,
        ElementRole::Unknown => {
            log::trace!("no textile role for <{}>, passing children through", node.tag_name());
            ElementRole::Unknown
        }
        role => role,
    }
}

/// The `code` element of a `pre` that wraps exactly one `code` element and
/// nothing else but whitespace.
pub fn code_wrapper(pre: &Node) -> Option<&Node> {
    let mut code = None;
    for child in pre.children() {
        if child.is_element() {
            if child.tag_name() != "code" || code.is_some() {
                return None;
            }
            code = Some(child);
        } else if child.is_text() && !child.is_blank_text() {
            return None;
        }
    }
    code
}
