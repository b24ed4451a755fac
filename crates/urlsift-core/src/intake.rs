//! Candidate URL extraction from pasted text and uploaded exports.
//!
//! Two shapes are recognised: plain text with one URL per line, and
//! OneTab-style exports where each line reads `URL | title`.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Separator used by OneTab-style exports between the URL and its title.
const ONETAB_SEPARATOR: &str = " | ";

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)https?://[^\s<>"']+"#).expect("static URL pattern is valid")
    })
}

/// Splits submitted text into candidate URLs, in order.
///
/// Blank lines are dropped. If the text contains `" | "` anywhere it is read as
/// a OneTab export and only the part before the first separator counts. Only
/// entries starting with `http` are kept; no further validation happens here.
pub fn parse_submission(text: &str) -> Vec<String> {
    let onetab = text.contains(ONETAB_SEPARATOR);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if onetab {
                line.split(ONETAB_SEPARATOR).next().unwrap_or(line).trim()
            } else {
                line
            }
        })
        .filter(|candidate| candidate.starts_with("http"))
        .map(str::to_string)
        .collect()
}

/// Finds every `http(s)://` URL embedded in free text, keeping only those that parse.
pub fn extract_urls_from_text(text: &str) -> Vec<String> {
    url_pattern()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| is_valid_url(candidate))
        .map(str::to_string)
        .collect()
}

/// True when `s` parses as an absolute URL.
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_keep_http_entries_in_order() {
        let text = "https://a.com/1\n\n  http://b.com/2  \nnot a url\nftp://c.com/3\n";
        assert_eq!(
            parse_submission(text),
            vec!["https://a.com/1", "http://b.com/2"]
        );
    }

    #[test]
    fn onetab_export_takes_url_before_separator() {
        let text = "https://a.com/job/1 | Senior Engineer - Acme\n\
                    https://b.com/x?utm_source=li | Some | Title with pipes\n\
                    just a note\n";
        assert_eq!(
            parse_submission(text),
            vec!["https://a.com/job/1", "https://b.com/x?utm_source=li"]
        );
    }

    #[test]
    fn windows_line_endings() {
        let text = "https://a.com/1\r\nhttps://a.com/2\r\n";
        assert_eq!(parse_submission(text), vec!["https://a.com/1", "https://a.com/2"]);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(parse_submission("").is_empty());
        assert!(parse_submission("\n  \n").is_empty());
    }

    #[test]
    fn extracts_embedded_urls() {
        let text = r#"See <https://a.com/x?id=1> and "http://b.org/y", also HTTPS://C.NET/z."#;
        assert_eq!(
            extract_urls_from_text(text),
            vec!["https://a.com/x?id=1", "http://b.org/y", "HTTPS://C.NET/z."]
        );
    }

    #[test]
    fn validity_check() {
        assert!(is_valid_url("https://example.com"));
        assert!(!is_valid_url("example.com/path"));
        assert!(!is_valid_url(""));
    }
}
