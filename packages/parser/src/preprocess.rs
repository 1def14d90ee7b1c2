//! Text-level fixups applied before structural parsing.
//!
//! Incoming markup is frequently produced by HTML-oriented editors, which are
//! laxer than the dialect about entities and void elements. Both fixups are
//! idempotent so re-preprocessing already-fixed text changes nothing.

use crate::markup::VOID_ELEMENTS;

/// The five entities the dialect itself understands; everything else named
/// must be decoded to its literal character before parsing.
const KEEP_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

/// Named HTML entities decoded to literal characters. Numeric references are
/// left alone (legal in the dialect).
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("nbsp", '\u{00a0}'),
    ("iexcl", '¡'),
    ("cent", '¢'),
    ("pound", '£'),
    ("curren", '¤'),
    ("yen", '¥'),
    ("brvbar", '¦'),
    ("sect", '§'),
    ("uml", '¨'),
    ("copy", '©'),
    ("ordf", 'ª'),
    ("laquo", '«'),
    ("not", '¬'),
    ("shy", '\u{00ad}'),
    ("reg", '®'),
    ("macr", '¯'),
    ("deg", '°'),
    ("plusmn", '±'),
    ("sup2", '²'),
    ("sup3", '³'),
    ("acute", '´'),
    ("micro", 'µ'),
    ("para", '¶'),
    ("middot", '·'),
    ("cedil", '¸'),
    ("sup1", '¹'),
    ("ordm", 'º'),
    ("raquo", '»'),
    ("frac14", '¼'),
    ("frac12", '½'),
    ("frac34", '¾'),
    ("iquest", '¿'),
    ("times", '×'),
    ("divide", '÷'),
    ("szlig", 'ß'),
    ("agrave", 'à'),
    ("aacute", 'á'),
    ("eacute", 'é'),
    ("egrave", 'è'),
    ("ouml", 'ö'),
    ("uuml", 'ü'),
    ("ndash", '–'),
    ("mdash", '—'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("bull", '•'),
    ("hellip", '…'),
    ("permil", '‰'),
    ("prime", '′'),
    ("euro", '€'),
    ("trade", '™'),
    ("larr", '←'),
    ("uarr", '↑'),
    ("rarr", '→'),
    ("darr", '↓'),
    ("harr", '↔'),
];

/// Run both fixups in order.
pub fn preprocess(source: &str) -> String {
    self_close_void_elements(&decode_entities(source))
}

/// Decode every named entity except the five dialect-legal ones. Unknown
/// names and numeric references pass through unchanged.
pub fn decode_entities(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'&' {
            if let Some(end) = find_entity_end(bytes, i) {
                let name = &source[i + 1..end];
                if !name.starts_with('#') && !KEEP_ENTITIES.contains(&name) {
                    if let Some(&(_, ch)) =
                        NAMED_ENTITIES.iter().find(|(entity, _)| *entity == name)
                    {
                        out.push(ch);
                        i = end + 1;
                        continue;
                    }
                }
            }
        }
        // Copy one UTF-8 character.
        let ch_len = utf8_len(bytes[i]);
        out.push_str(&source[i..i + ch_len]);
        i += ch_len;
    }
    out
}

/// Position of the terminating `;` for an entity starting at `start`, if the
/// run of name characters is plausibly an entity.
fn find_entity_end(bytes: &[u8], start: usize) -> Option<usize> {
    let limit = (start + 32).min(bytes.len());
    let mut i = start + 1;
    while i < limit {
        match bytes[i] {
            b';' => return if i > start + 1 { Some(i) } else { None },
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'#' => i += 1,
            _ => return None,
        }
    }
    None
}

fn utf8_len(byte: u8) -> usize {
    match byte {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        _ => 4,
    }
}

/// Rewrite HTML void elements (`<br>`, `<hr>`, `<img src="x">`) to
/// self-closed form. Already self-closed elements are left alone, so a second
/// pass over the same text is a no-op. Comments are not rewritten.
pub fn self_close_void_elements(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 16);
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if source[i..].starts_with("<!--") {
            let end = source[i..]
                .find("-->")
                .map(|offset| i + offset + 3)
                .unwrap_or(bytes.len());
            out.push_str(&source[i..end]);
            i = end;
            continue;
        }
        if bytes[i] == b'<' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_alphabetic() {
            let name_end = tag_name_end(bytes, i + 1);
            let name = source[i + 1..name_end].to_ascii_lowercase();
            if VOID_ELEMENTS.contains(&name.as_str()) {
                if let Some(gt) = find_tag_end(bytes, name_end) {
                    let body = source[i..gt].trim_end();
                    if body.ends_with('/') {
                        out.push_str(&source[i..=gt]);
                    } else {
                        out.push_str(body);
                        out.push_str(" />");
                    }
                    i = gt + 1;
                    continue;
                }
            }
        }
        let ch_len = utf8_len(bytes[i]);
        out.push_str(&source[i..i + ch_len]);
        i += ch_len;
    }
    out
}

fn tag_name_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len()
        && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b'_')
    {
        i += 1;
    }
    i
}

/// Position of the `>` ending the tag that starts before `from`, honoring
/// quoted attribute values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        match (quote, bytes[i]) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => quote = Some(bytes[i]),
            (None, b'>') => return Some(i),
            (None, b'<') => return None,
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_html_entities() {
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{00a0}b");
        assert_eq!(decode_entities("&copy; 2024 &mdash; x"), "© 2024 — x");
    }

    #[test]
    fn test_keeps_the_five_legal_entities() {
        let source = "&amp; &lt; &gt; &quot; &apos;";
        assert_eq!(decode_entities(source), source);
    }

    #[test]
    fn test_keeps_numeric_and_unknown_entities() {
        assert_eq!(decode_entities("&#169; &#x2014;"), "&#169; &#x2014;");
        assert_eq!(decode_entities("&notanentity;"), "&notanentity;");
        assert_eq!(decode_entities("a & b"), "a & b");
    }

    #[test]
    fn test_self_closes_void_elements() {
        assert_eq!(self_close_void_elements("a<br>b"), "a<br />b");
        assert_eq!(
            self_close_void_elements(r#"<img src="x.png">"#),
            r#"<img src="x.png" />"#
        );
    }

    #[test]
    fn test_self_closing_is_idempotent() {
        let once = self_close_void_elements("a<br>b<hr>");
        let twice = self_close_void_elements(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "a<br />b<hr />");
    }

    #[test]
    fn test_leaves_non_void_elements_alone() {
        let source = "<p>text</p>";
        assert_eq!(self_close_void_elements(source), source);
    }

    #[test]
    fn test_ignores_comments_and_quoted_brackets() {
        let source = r#"<!--<br>--><img alt="a>b" src="x">"#;
        assert_eq!(
            self_close_void_elements(source),
            r#"<!--<br>--><img alt="a>b" src="x" />"#
        );
    }
}
