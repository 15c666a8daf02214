//! Utility functions and constants for HTML processing.

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text content is not entity-encoded by the parser
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag holds raw text
pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check if whitespace-only text is formatting between tags rather than content
pub fn is_formatting_whitespace(text: &str) -> bool {
    text.contains('\n') && text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_void() {
        assert!(is_void("br"));
        assert!(is_void("img"));
        assert!(is_void("HR"));
        assert!(!is_void("div"));
    }

    #[test]
    fn test_is_raw_text() {
        assert!(is_raw_text("script"));
        assert!(is_raw_text("STYLE"));
        assert!(!is_raw_text("p"));
    }

    #[test]
    fn test_clean_attribute() {
        assert_eq!(clean_attribute(Some("  x ")), Some("x".to_string()));
        assert_eq!(clean_attribute(Some("   ")), None);
        assert_eq!(clean_attribute(None), None);
    }

    #[test]
    fn test_is_formatting_whitespace() {
        assert!(is_formatting_whitespace("\n\t"));
        assert!(!is_formatting_whitespace(" "));
        assert!(!is_formatting_whitespace("\nbizz buzz"));
    }
}
