//! HTML rendering of the Textile AST
//!
//! Output follows the layout of the classic Textile renderers: blocks joined
//! by a newline, list items on their own tab-indented lines and `<br />` for
//! hard line breaks.

use crate::ast::{Block, Inline, List};
use crate::escape::{escape_attribute, push_escaped};
use crate::options::Options;

/// Render a block to an HTML string
pub fn render(block: &Block, options: &Options) -> String {
    let mut output = String::with_capacity(1024);
    render_block(block, options, &mut output);
    output
}

fn render_block(block: &Block, options: &Options, out: &mut String) {
    match block {
        Block::Document(blocks) => render_blocks(blocks, options, out),

        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            render_inlines(content, options, out);
            out.push_str(&format!("</h{level}>"));
        }

        Block::Paragraph(inlines) => {
            out.push_str("<p>");
            render_inlines(inlines, options, out);
            out.push_str("</p>");
        }

        Block::BlockQuote(blocks) => {
            out.push_str("<blockquote>\n");
            render_blocks(blocks, options, out);
            out.push_str("\n</blockquote>");
        }

        Block::CodeBlock(code) => {
            out.push_str("<pre><code>");
            push_escaped(out, code);
            out.push_str("</code></pre>");
        }

        Block::List(list) => render_list(list, 0, options, out),

        Block::Html(html) => out.push_str(html),
    }
}

fn render_blocks(blocks: &[Block], options: &Options, out: &mut String) {
    for (i, block) in blocks.iter().filter(|b| !b.is_blank()).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_block(block, options, out);
    }
}

fn render_list(list: &List, depth: usize, options: &Options, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    let indent = "\t".repeat(depth);

    out.push_str(&indent);
    out.push_str(&format!("<{tag}>\n"));

    for item in list.items.iter().filter(|item| !item.is_blank()) {
        out.push_str(&indent);
        out.push_str("\t<li>");
        render_inlines(&item.content, options, out);
        for sublist in &item.sublists {
            out.push('\n');
            render_list(sublist, depth + 1, options, out);
        }
        out.push_str("</li>\n");
    }

    out.push_str(&indent);
    out.push_str(&format!("</{tag}>"));
}

fn render_inlines(inlines: &[Inline], options: &Options, out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => push_escaped(out, text),

            Inline::Phrase { kind, content } => {
                let tag = kind.tag();
                out.push_str(&format!("<{tag}>"));
                render_inlines(content, options, out);
                out.push_str(&format!("</{tag}>"));
            }

            Inline::Code(code) => {
                out.push_str("<code>");
                push_escaped(out, code);
                out.push_str("</code>");
            }

            Inline::Link {
                content,
                url,
                title,
            } => {
                out.push_str("<a href=\"");
                out.push_str(&escape_attribute(url));
                out.push('"');
                if let Some(title) = title {
                    out.push_str(" title=\"");
                    out.push_str(&escape_attribute(title));
                    out.push('"');
                }
                out.push('>');
                render_inlines(content, options, out);
                out.push_str("</a>");
            }

            Inline::LineBreak => {
                if options.hard_breaks {
                    out.push_str("<br />\n");
                } else {
                    out.push('\n');
                }
            }

            Inline::Html(html) => out.push_str(html),
        }
    }
}
