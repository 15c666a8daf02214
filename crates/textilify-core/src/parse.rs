//! Textile parsing
//!
//! Splits Textile source into blocks on blank lines, recognises block
//! signatures (`h1.`, `bq.`, `bc.`, `bc..`, `p.`), list markers and raw HTML
//! blocks, then scans each block for inline forms.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Block, Inline, List, ListItem, Phrase};

static BLOCK_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(h[1-6]|bq|bc|p)\.[ \t]")
        .expect("BLOCK_SIGNATURE: hardcoded regex is valid")
});

static LIST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([*#]+)[ \t]+(.*)$").expect("LIST_LINE: hardcoded regex is valid")
});

static BRACKET_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\["(.+?)":([^\]\s]+)\]"#).expect("BRACKET_LINK: hardcoded regex is valid")
});

static QUOTED_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"([^"\n]+)":(\S+)"#).expect("QUOTED_LINK: hardcoded regex is valid")
});

static LINK_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)\s*\(([^()]+)\)$").expect("LINK_TITLE: hardcoded regex is valid")
});

static INLINE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>")
        .expect("INLINE_TAG: hardcoded regex is valid")
});

/// Characters stripped from the end of a bare `"text":url` link
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

/// Parse Textile source into a [`Block::Document`].
pub fn parse(source: &str) -> Block {
    let source = source.replace("\r\n", "\n");
    let mut raw = split_blocks(&source).into_iter().peekable();
    let mut blocks = Vec::new();

    while let Some(block) = raw.next() {
        let parsed = match extended_code(&block) {
            Some(first) => {
                // Extended code runs across blank lines up to the next signature or list
                let mut code = first.to_string();
                while let Some(next) = raw.next_if(|next| !starts_block(next)) {
                    code.push_str("\n\n");
                    code.push_str(&next);
                }
                Block::CodeBlock(code)
            }
            None => parse_block(&block),
        };
        if !parsed.is_blank() {
            blocks.push(parsed);
        }
    }

    Block::Document(blocks)
}

/// The body of a `bc..` block
fn extended_code(block: &str) -> Option<&str> {
    block
        .strip_prefix("bc..")?
        .strip_prefix(|c: char| c == ' ' || c == '\t')
}

/// Whether a block ends a preceding extended block
fn starts_block(block: &str) -> bool {
    BLOCK_SIGNATURE.is_match(block)
        || extended_code(block).is_some()
        || LIST_LINE.is_match(block.lines().next().unwrap_or_default())
}

/// Group consecutive non-blank lines into blocks.
fn split_blocks(source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in source.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

fn parse_block(block: &str) -> Block {
    if let Some(caps) = BLOCK_SIGNATURE.captures(block) {
        let body = &block[caps.get(0).map_or(0, |m| m.end())..];
        return match &caps[1] {
            "bq" => Block::BlockQuote(vec![Block::Paragraph(parse_inlines(body))]),
            "bc" => Block::CodeBlock(body.to_string()),
            "p" => Block::Paragraph(parse_inlines(body)),
            heading => Block::Heading {
                level: heading[1..].parse().unwrap_or(1),
                content: parse_inlines(body),
            },
        };
    }

    let first_line = block.lines().next().unwrap_or_default();
    if LIST_LINE.is_match(first_line) {
        return Block::List(parse_list(block));
    }

    if block.starts_with('<') {
        return Block::Html(block.to_string());
    }

    Block::Paragraph(parse_inlines(block))
}

/// A list line: its markers and its text
struct Entry {
    markers: String,
    content: String,
}

impl Entry {
    fn depth(&self) -> usize {
        self.markers.len()
    }

    /// Kind of the list at `depth` (1-based) as seen from this line
    fn ordered_at(&self, depth: usize) -> bool {
        self.markers.as_bytes().get(depth - 1) == Some(&b'#')
    }
}

fn parse_list(block: &str) -> List {
    let mut entries: Vec<Entry> = Vec::new();

    for line in block.lines() {
        if let Some(caps) = LIST_LINE.captures(line) {
            entries.push(Entry {
                markers: caps[1].to_string(),
                content: caps[2].to_string(),
            });
        } else if let Some(last) = entries.last_mut() {
            // Continuation line of the previous item
            last.content.push('\n');
            last.content.push_str(line);
        }
    }

    // A list may open with a nested line; the shallowest line sets the top level
    let depth = entries.iter().map(Entry::depth).min().unwrap_or(1);
    build_list(&entries, depth).0
}

/// Build the list at `depth` from `entries`, returning it with the number of
/// entries consumed. Deeper entries become sublists of the preceding item;
/// with no preceding item they hang off an empty one.
fn build_list(entries: &[Entry], depth: usize) -> (List, usize) {
    let mut list = List {
        ordered: entries.first().is_some_and(|entry| entry.ordered_at(depth)),
        items: Vec::new(),
    };

    let mut i = 0;
    while i < entries.len() {
        let entry = &entries[i];
        if entry.depth() < depth {
            break;
        }

        if entry.depth() == depth {
            list.items.push(ListItem::new(parse_inlines(&entry.content)));
            i += 1;
        } else {
            let (sublist, consumed) = build_list(&entries[i..], depth + 1);
            if list.items.is_empty() {
                list.items.push(ListItem::default());
            }
            if let Some(item) = list.items.last_mut() {
                item.sublists.push(sublist);
            }
            i += consumed;
        }
    }

    (list, i)
}

/// Parse the inline content of a block.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut buffer = String::new();
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c == '\n' {
            flush_text(&mut buffer, &mut inlines);
            inlines.push(Inline::LineBreak);
            prev = Some(c);
            i += 1;
            continue;
        }

        let matched = match INLINE_TAG.find(rest) {
            Some(tag) => Some((Inline::Html(tag.as_str().to_string()), tag.end())),
            None if prev.map_or(true, |p| !p.is_alphanumeric()) => match_inline(rest),
            None => None,
        };

        if let Some((inline, len)) = matched {
            flush_text(&mut buffer, &mut inlines);
            inlines.push(inline);
            i += len;
            prev = text[..i].chars().next_back();
            continue;
        }

        buffer.push(c);
        prev = Some(c);
        i += c.len_utf8();
    }

    flush_text(&mut buffer, &mut inlines);
    inlines
}

fn flush_text(buffer: &mut String, inlines: &mut Vec<Inline>) {
    if !buffer.is_empty() {
        inlines.push(Inline::Text(std::mem::take(buffer)));
    }
}

/// Try every inline form at the start of `rest`.
fn match_inline(rest: &str) -> Option<(Inline, usize)> {
    if let Some(caps) = BRACKET_LINK.captures(rest) {
        let len = caps.get(0)?.end();
        return Some((link(&caps[1], &caps[2]), len));
    }

    if let Some(caps) = QUOTED_LINK.captures(rest) {
        let url = caps.get(2)?;
        let trimmed = url.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if !trimmed.is_empty() {
            return Some((link(&caps[1], trimmed), url.start() + trimmed.len()));
        }
    }

    if let Some((code, len)) = match_delimited(rest, "@") {
        return Some((Inline::Code(code.to_string()), len));
    }

    Phrase::ALL.iter().find_map(|&kind| {
        match_delimited(rest, kind.delimiter()).map(|(inner, len)| {
            (
                Inline::Phrase {
                    kind,
                    content: parse_inlines(inner),
                },
                len,
            )
        })
    })
}

/// Split an optional trailing `(title)` off the link text.
fn link(text: &str, url: &str) -> Inline {
    let (text, title) = match LINK_TITLE.captures(text) {
        Some(caps) => (
            caps.get(1).map_or(text, |m| m.as_str()),
            caps.get(2).map(|m| m.as_str().to_string()),
        ),
        None => (text, None),
    };

    Inline::Link {
        content: parse_inlines(text),
        url: url.to_string(),
        title,
    }
}

/// Match `delimiter inner delimiter` at the start of `rest`.
///
/// The inner text must not start or end with whitespace, must stay on one
/// line, and the closing delimiter must not be followed by a word character.
fn match_delimited<'a>(rest: &'a str, delimiter: &str) -> Option<(&'a str, usize)> {
    let body = rest.strip_prefix(delimiter)?;
    if body.is_empty() || body.starts_with(char::is_whitespace) || body.starts_with(delimiter) {
        return None;
    }

    let mut search = 0;
    while let Some(offset) = body[search..].find(delimiter) {
        let end = search + offset;
        let inner = &body[..end];
        if inner.contains('\n') {
            return None;
        }

        let after = &body[end + delimiter.len()..];
        if !inner.is_empty()
            && !inner.ends_with(char::is_whitespace)
            && !after.starts_with(char::is_alphanumeric)
        {
            return Some((inner, end + delimiter.len() * 2));
        }
        search = end + 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_heading() {
        let doc = parse("\nh1. Foo\n");
        assert_eq!(
            doc,
            Block::Document(vec![Block::Heading {
                level: 1,
                content: vec![text("Foo")],
            }])
        );
    }

    #[test]
    fn test_blocks_split_on_blank_lines() {
        let Block::Document(blocks) = parse("h1. hello\n\n<script>x</script>\n\nlol\n") else {
            panic!("expected document");
        };
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], Block::Html("<script>x</script>".to_string()));
        assert_eq!(blocks[2], Block::Paragraph(vec![text("lol")]));
    }

    #[test]
    fn test_blockquote_keeps_line_breaks() {
        let doc = parse("bq. one\ntwo");
        assert_eq!(
            doc,
            Block::Document(vec![Block::BlockQuote(vec![Block::Paragraph(vec![
                text("one"),
                Inline::LineBreak,
                text("two"),
            ])])])
        );
    }

    #[test]
    fn test_code_block_is_verbatim() {
        let doc = parse("bc. a *b*\n  c");
        assert_eq!(
            doc,
            Block::Document(vec![Block::CodeBlock("a *b*\n  c".to_string())])
        );
    }

    #[test]
    fn test_nested_list() {
        let Block::Document(blocks) = parse("* one\n** two\n* three\n# four") else {
            panic!("expected document");
        };
        let Block::List(list) = &blocks[0] else {
            panic!("expected list");
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.items[0].sublists.len(), 1);
        assert_eq!(list.items[0].sublists[0].items[0].content, vec![text("two")]);
    }

    #[test]
    fn test_extended_code_block_spans_blank_lines() {
        let Block::Document(blocks) = parse("bc.. a\n\n  b\n\np. lol\n\n* x") else {
            panic!("expected document");
        };
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::CodeBlock("a\n\n  b".to_string()));
        assert_eq!(blocks[1], Block::Paragraph(vec![text("lol")]));
        assert!(matches!(blocks[2], Block::List(_)));
    }

    #[test]
    fn test_list_opening_with_nested_line() {
        let Block::Document(blocks) = parse("** x\n* y") else {
            panic!("expected document");
        };
        let Block::List(list) = &blocks[0] else {
            panic!("expected list");
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 2);
        assert!(list.items[0].content.is_empty());
        assert_eq!(list.items[0].sublists[0].items[0].content, vec![text("x")]);
        assert_eq!(list.items[1].content, vec![text("y")]);
    }

    #[test]
    fn test_mixed_list_kinds_per_level() {
        let Block::Document(blocks) = parse("* a\n*# b") else {
            panic!("expected document");
        };
        let Block::List(list) = &blocks[0] else {
            panic!("expected list");
        };
        assert!(!list.ordered);
        assert!(list.items[0].sublists[0].ordered);
    }

    #[test]
    fn test_link_text_with_quotes() {
        assert_eq!(
            parse_inlines(r#"["say "hi"":/x]"#),
            vec![Inline::Link {
                content: vec![text(r#"say "hi""#)],
                url: "/x".to_string(),
                title: None,
            }]
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            parse_inlines(r#"see "here":http://x.com/."#),
            vec![
                text("see "),
                Inline::Link {
                    content: vec![text("here")],
                    url: "http://x.com/".to_string(),
                    title: None,
                },
                text("."),
            ]
        );

        assert_eq!(
            parse_inlines(r#"["a sample (Fudd)":http://sample.com/]"#),
            vec![Inline::Link {
                content: vec![text("a sample")],
                url: "http://sample.com/".to_string(),
                title: Some("Fudd".to_string()),
            }]
        );
    }

    #[test]
    fn test_phrases() {
        assert_eq!(
            parse_inlines("a *b* **c** @d*e@"),
            vec![
                text("a "),
                Inline::Phrase {
                    kind: Phrase::Strong,
                    content: vec![text("b")],
                },
                text(" "),
                Inline::Phrase {
                    kind: Phrase::Bold,
                    content: vec![text("c")],
                },
                text(" "),
                Inline::Code("d*e".to_string()),
            ]
        );
    }

    #[test]
    fn test_delimiters_need_word_boundaries() {
        assert_eq!(parse_inlines("well-known fact-check"), vec![text("well-known fact-check")]);
        assert_eq!(parse_inlines("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
        assert_eq!(parse_inlines("snake_case_name"), vec![text("snake_case_name")]);
    }

    #[test]
    fn test_inline_tags_pass_through() {
        assert_eq!(
            parse_inlines("a<script>b"),
            vec![text("a"), Inline::Html("<script>".to_string()), text("b")]
        );
    }
}
