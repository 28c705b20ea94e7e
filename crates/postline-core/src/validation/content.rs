//! Content-level predicates shared by the submission validator.

use url::Url;

/// True when a block's content carries no visible text.
///
/// Rich-text editors submit placeholder markup for an empty field, so the
/// check strips HTML tags and entity whitespace before testing emptiness.
pub fn is_effectively_empty(content: &str) -> bool {
    visible_text(content).is_empty()
}

fn visible_text(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&nbsp;", " ").trim().to_string()
}

/// True when the string parses as an absolute http or https URL.
pub fn is_valid_media_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content() {
        assert!(is_effectively_empty(""));
        assert!(is_effectively_empty("   \n\t "));
        assert!(is_effectively_empty("<p></p>"));
        assert!(is_effectively_empty("<p>&nbsp;</p>"));
        assert!(is_effectively_empty("<div><br/></div>"));
    }

    #[test]
    fn test_non_empty_content() {
        assert!(!is_effectively_empty("hello"));
        assert!(!is_effectively_empty("<p>hello</p>"));
        assert!(!is_effectively_empty("  a  "));
    }

    #[test]
    fn test_media_url_scheme() {
        assert!(is_valid_media_url("https://example.com/a.png"));
        assert!(is_valid_media_url("http://example.com/a.png"));
        assert!(!is_valid_media_url("ftp://example.com/a.png"));
        assert!(!is_valid_media_url("file:///etc/passwd"));
        assert!(!is_valid_media_url("not a url"));
        assert!(!is_valid_media_url("/relative/path.png"));
    }
}
