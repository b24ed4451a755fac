//! URL canonicalization.
//!
//! Turns a submitted URL into the canonical form used for duplicate detection:
//! tracking query parameters are dropped (functional ones always survive) and a
//! single trailing path slash is removed. Two URLs are "the same" exactly when
//! their canonical forms are equal.

mod params;

pub use params::{is_functional_param, is_tracking_param, should_strip};

use serde::{Deserialize, Serialize};
use url::Url;

/// Domain reported when a URL cannot be parsed or has no host.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Canonical form of a submitted URL plus the host it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedUrl {
    pub cleaned_url: String,
    pub domain: String,
}

/// Canonicalizes `raw`. Never fails: an unparseable input comes back unchanged
/// with the domain set to [`UNKNOWN_DOMAIN`].
///
/// # Examples
///
/// - `normalize("https://x.com/a?utm_source=foo&id=5")` → `https://x.com/a?id=5`
/// - `normalize("https://x.com/a/")` → `https://x.com/a`
/// - `normalize("https://x.com/")` → `https://x.com/`
pub fn normalize(raw: &str) -> NormalizedUrl {
    let mut url = match Url::parse(raw) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!(url = raw, "url not parseable, keeping as-is: {}", e);
            return NormalizedUrl {
                cleaned_url: raw.to_string(),
                domain: UNKNOWN_DOMAIN.to_string(),
            };
        }
    };

    strip_tracking_query(&mut url);
    trim_trailing_slash(&mut url);

    NormalizedUrl {
        domain: domain_of(&url),
        cleaned_url: url.into(),
    }
}

/// Host component of `raw`, or [`UNKNOWN_DOMAIN`] when it has none or does not parse.
pub fn extract_domain(raw: &str) -> String {
    Url::parse(raw)
        .map(|u| domain_of(&u))
        .unwrap_or_else(|_| UNKNOWN_DOMAIN.to_string())
}

fn domain_of(url: &Url) -> String {
    url.host_str()
        .filter(|h| !h.is_empty())
        .unwrap_or(UNKNOWN_DOMAIN)
        .to_string()
}

/// Filters the query string segment by segment so surviving parameters keep
/// their order and their original encoding. A query with nothing to strip is
/// left byte-for-byte alone, including a bare `?` or empty `&&` segments.
fn strip_tracking_query(url: &mut Url) {
    let Some(query) = url.query() else {
        return;
    };

    let segments: Vec<&str> = query.split('&').filter(|s| !s.is_empty()).collect();
    let kept: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|segment| !should_strip(&param_name(segment)))
        .collect();
    if kept.len() == segments.len() {
        return;
    }

    if kept.is_empty() {
        url.set_query(None);
    } else {
        let rebuilt = kept.join("&");
        url.set_query(Some(&rebuilt));
    }
}

/// Decoded name of one `name=value` query segment.
fn param_name(segment: &str) -> String {
    url::form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
        .unwrap_or_default()
}

/// Removes exactly one trailing slash from a non-root path.
fn trim_trailing_slash(url: &mut Url) {
    if url.cannot_be_a_base() {
        return;
    }
    let path = url.path();
    if path != "/" && path.ends_with('/') {
        let trimmed = path[..path.len() - 1].to_string();
        url.set_path(&trimmed);
    }
}
