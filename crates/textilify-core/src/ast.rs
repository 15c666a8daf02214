//! Textile Abstract Syntax Tree
//!
//! This module defines the AST nodes produced by the Textile parser and
//! consumed by the HTML renderer.

/// A block-level Textile node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Root document container
    Document(Vec<Block>),

    /// Heading (`h1.` through `h6.`) with inline content
    Heading { level: u8, content: Vec<Inline> },

    /// Paragraph, either explicit (`p.`) or implied
    Paragraph(Vec<Inline>),

    /// Block quote (`bq.`) containing nested blocks
    BlockQuote(Vec<Block>),

    /// Block code (`bc.`), kept verbatim
    CodeBlock(String),

    /// Bulleted or numbered list
    List(List),

    /// Raw HTML block, passed through untouched
    Html(String),
}

/// A list and its items. Nested lists hang off their parent item.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub content: Vec<Inline>,
    pub sublists: Vec<List>,
}

impl ListItem {
    pub fn new(content: Vec<Inline>) -> Self {
        Self {
            content,
            sublists: Vec::new(),
        }
    }
}

/// Phrase modifiers and the delimiters that produce them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    /// `*strong*`
    Strong,
    /// `_emphasis_`
    Emphasis,
    /// `**bold**`
    Bold,
    /// `__italic__`
    Italic,
    /// `??citation??`
    Citation,
    /// `-deleted-`
    Deleted,
    /// `+inserted+`
    Inserted,
    /// `^superscript^`
    Superscript,
    /// `~subscript~`
    Subscript,
}

impl Phrase {
    /// Every phrase, longest delimiter first so `**` wins over `*`.
    pub const ALL: [Phrase; 9] = [
        Phrase::Bold,
        Phrase::Italic,
        Phrase::Citation,
        Phrase::Strong,
        Phrase::Emphasis,
        Phrase::Deleted,
        Phrase::Inserted,
        Phrase::Superscript,
        Phrase::Subscript,
    ];

    /// The Textile delimiter wrapped around the phrase
    pub fn delimiter(self) -> &'static str {
        match self {
            Phrase::Strong => "*",
            Phrase::Emphasis => "_",
            Phrase::Bold => "**",
            Phrase::Italic => "__",
            Phrase::Citation => "??",
            Phrase::Deleted => "-",
            Phrase::Inserted => "+",
            Phrase::Superscript => "^",
            Phrase::Subscript => "~",
        }
    }

    /// The HTML element the phrase renders to
    pub fn tag(self) -> &'static str {
        match self {
            Phrase::Strong => "strong",
            Phrase::Emphasis => "em",
            Phrase::Bold => "b",
            Phrase::Italic => "i",
            Phrase::Citation => "cite",
            Phrase::Deleted => "del",
            Phrase::Inserted => "ins",
            Phrase::Superscript => "sup",
            Phrase::Subscript => "sub",
        }
    }
}

/// An inline Textile node
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Plain text, unescaped
    Text(String),

    /// Phrase modifier around nested inline content
    Phrase { kind: Phrase, content: Vec<Inline> },

    /// Inline code (`@code@`)
    Code(String),

    /// Link with text, URL, and optional title
    Link {
        content: Vec<Inline>,
        url: String,
        title: Option<String>,
    },

    /// Line break inside a block
    LineBreak,

    /// Raw inline HTML tag, passed through untouched
    Html(String),
}

impl Block {
    /// Check if this block is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Document(blocks) | Block::BlockQuote(blocks) => {
                blocks.iter().all(|b| b.is_blank())
            }
            Block::Paragraph(inlines) => inlines.iter().all(|i| i.is_blank()),
            Block::Heading { content, .. } => content.iter().all(|i| i.is_blank()),
            Block::CodeBlock(code) => code.trim().is_empty(),
            Block::List(list) => list.items.iter().all(|i| i.is_blank()),
            Block::Html(html) => html.trim().is_empty(),
        }
    }
}

impl ListItem {
    pub fn is_blank(&self) -> bool {
        self.content.iter().all(|i| i.is_blank())
            && self
                .sublists
                .iter()
                .all(|l| l.items.iter().all(|i| i.is_blank()))
    }
}

impl Inline {
    /// Check if this inline is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Phrase { content, .. } | Inline::Link { content, .. } => {
                content.iter().all(|i| i.is_blank())
            }
            Inline::Code(code) => code.is_empty(),
            Inline::LineBreak => true,
            Inline::Html(html) => html.trim().is_empty(),
        }
    }
}
