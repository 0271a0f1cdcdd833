//! Text escaping for markup injection.

/// Escape a string for safe HTML insertion.
///
/// Covers the five reserved characters; everything else passes through.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn script_tags_become_literal_text() {
        let escaped = escape_html("<script>alert(1)</script>");
        assert!(!escaped.contains('<'));
        assert_eq!(escaped, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("Stay hydrated 💗"), "Stay hydrated 💗");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn ampersand_is_not_double_escaped_in_one_pass() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
