//! Whitespace normalization for document-mode output.
//!
//! Every block emitted by the serializer brings a leading and trailing
//! newline, so nested blocks stack up blank lines. This pass, run once on the
//! whole document, folds them back to the one-blank-line convention.

use once_cell::sync::Lazy;
use regex::Regex;

/// Three or more line breaks, with any whitespace between them
static EXTRANEOUS_NEWLINES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n\s*\n").expect("EXTRANEOUS_NEWLINES: hardcoded regex is valid")
});

/// Collapse runs of blank lines to a single blank line and trim the text to
/// exactly one newline at each end. Blank input yields an empty string.
pub fn normalize(text: &str) -> String {
    let collapsed = EXTRANEOUS_NEWLINES.replace_all(text, "\n\n");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut output = String::with_capacity(trimmed.len() + 2);
    output.push('\n');
    output.push_str(trimmed);
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(normalize("a\n\n\n\nb"), "\na\n\nb\n");
        assert_eq!(normalize("a\n \n\t\n b"), "\na\n\nb\n");
    }

    #[test]
    fn test_keeps_single_blank_line() {
        assert_eq!(normalize("\nh1. Foo\n\nbar\n"), "\nh1. Foo\n\nbar\n");
    }

    #[test]
    fn test_trims_to_one_newline() {
        assert_eq!(normalize("\n\nh1. Foo\n\n"), "\nh1. Foo\n");
        assert_eq!(normalize("inner"), "\ninner\n");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\n\n \n"), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("\n\n* one\n* three\n\n\n\nbc. x\n\n\n");
        assert_eq!(normalize(&once), once);
    }
}
