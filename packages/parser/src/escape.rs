//! Escaping and URL-safety helpers shared by the reader and the generator.

/// Escape a string for use inside a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape plain text content. Only ampersand and the opening angle bracket —
/// rich content passed through here has already been sanitized and its tags
/// must survive.
pub fn escape_content(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            other => out.push(other),
        }
    }
    out
}

/// Decode the five dialect-legal entities back to literal characters.
pub fn decode_basic_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Neutralize URLs with disallowed schemes to `"#"` so generated href/src
/// attributes are always present and inert. Relative URLs, fragments and
/// `{{ var }}` placeholders pass through untouched.
pub fn safe_url(url: &str) -> &str {
    let trimmed = url.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with('/')
        || trimmed.starts_with("{{")
    {
        return url;
    }

    // Strip whitespace and control characters the way browsers do before
    // scheme detection, so "jav\nascript:" cannot slip through.
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match cleaned.find(':') {
        None => url,
        Some(colon) => {
            let head = &cleaned[..colon];
            if head.contains('/') || head.contains('?') || head.contains('#') {
                // The colon belongs to the path or query; the URL is relative.
                return url;
            }
            if SAFE_SCHEMES.contains(&head.to_ascii_lowercase().as_str()) {
                url
            } else {
                "#"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attribute() {
        assert_eq!(
            escape_attribute(r#"a & "b" <c>"#),
            "a &amp; &quot;b&quot; &lt;c&gt;"
        );
    }

    #[test]
    fn test_escape_content_leaves_closing_brackets() {
        assert_eq!(escape_content("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 > 2");
    }

    #[test]
    fn test_decode_basic_entities() {
        assert_eq!(decode_basic_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_basic_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_basic_entities("no entities"), "no entities");
    }

    #[test]
    fn test_safe_url_allows_common_schemes() {
        assert_eq!(safe_url("https://example.com"), "https://example.com");
        assert_eq!(safe_url("mailto:a@b.c"), "mailto:a@b.c");
        assert_eq!(safe_url("tel:+15551234"), "tel:+15551234");
        assert_eq!(safe_url("#anchor"), "#anchor");
        assert_eq!(safe_url("/relative/path"), "/relative/path");
        assert_eq!(safe_url("{{ cta_url }}"), "{{ cta_url }}");
    }

    #[test]
    fn test_safe_url_neutralizes_scripting_schemes() {
        assert_eq!(safe_url("javascript:alert(1)"), "#");
        assert_eq!(safe_url("JAVASCRIPT:alert(1)"), "#");
        assert_eq!(safe_url("jav\nascript:alert(1)"), "#");
        assert_eq!(safe_url("data:text/html,x"), "#");
        assert_eq!(safe_url("vbscript:x"), "#");
    }
}
