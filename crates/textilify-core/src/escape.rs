//! HTML escaping primitives shared by the renderer and the sanitizer.

/// Escape text content: `&`, `<` and `>`.
///
/// Quotes are left alone, they are only significant inside attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    push_escaped(&mut result, text);
    result
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Append `text` to `out` with text-content escaping applied.
pub fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
        assert_eq!(escape_html("alert('ohai!');"), "alert('ohai!');");
        assert_eq!(escape_html("say \"hi\""), "say \"hi\"");
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("a \"b\" & c"), "a &quot;b&quot; &amp; c");
        assert_eq!(escape_attribute("it's"), "it's");
    }
}
