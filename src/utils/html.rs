//! Minimal extraction helpers for HTML fragments embedded in feed items.
//!
//! This is intentionally not an HTML parser. Only the first `<img>` tag is
//! considered, its `src` must be quoted, and entities inside the value are
//! returned as-is.

use regex::Regex;
use std::sync::LazyLock;

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid img tag regex"));

static SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid src attribute regex")
});

/// Returns the `src` of the first `<img>` tag in `html`, if any. A first tag
/// without `src` yields `None`; later tags are never consulted.
pub fn first_image_src(html: &str) -> Option<String> {
    let tag = IMG_TAG.find(html)?;
    SRC_ATTR
        .captures(tag.as_str())
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|src| !src.is_empty())
}

/// Drops everything from the first `?` onwards.
pub fn strip_query(link: &str) -> &str {
    match link.find('?') {
        Some(idx) => &link[..idx],
        None => link,
    }
}
