//! Title cleaning, link resolution, and deduplication.
//!
//! The extraction strategies hand over raw candidates scraped from arbitrary
//! markup; this module is the final gate between them and the digest:
//!
//! 1. Titles get their whitespace runs collapsed and are trimmed
//! 2. Titles shorter than [`MIN_TITLE_CHARS`] are discarded
//! 3. Duplicate titles are removed, keeping the first occurrence in stable
//!    order
//! 4. The list is truncated to [`MAX_ITEMS`] entries
//!
//! Link resolution turns the homepage's mix of protocol-relative,
//! site-relative, and schemeless hrefs into absolute URLs. The rules mirror
//! the markup the site actually serves rather than general URL semantics:
//! a bare host like `news.baidu.com` gets `https://` prefixed instead of
//! being joined as a relative path.

use crate::fetch::HOMEPAGE_URL;
use crate::models::NewsItem;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Cleaned titles shorter than this (in chars) are discarded.
pub const MIN_TITLE_CHARS: usize = 3;

/// The digest carries at most this many unique items.
pub const MAX_ITEMS: usize = 10;

/// Scheme + host of the homepage, e.g. `https://www.baidu.com`.
static SITE_ORIGIN: Lazy<String> = Lazy::new(|| {
    Url::parse(HOMEPAGE_URL)
        .expect("homepage URL is valid")
        .origin()
        .ascii_serialization()
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse internal whitespace runs to single spaces and trim the ends.
///
/// The homepage nests headline text inside spans and list markup, so raw
/// `text()` extraction carries newlines and indentation. Uses Unicode-aware
/// `\s`, which also covers the full-width space common in Chinese text.
pub fn clean_title(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}

/// Resolve a scraped href to an absolute URL.
///
/// * empty → the site origin
/// * `//host/path` → `https:` prefixed
/// * `/path` → origin prefixed
/// * anything not starting with `http` → `https://` prefixed
/// * otherwise returned unchanged (idempotent on absolute URLs)
pub fn resolve_link(link: &str) -> String {
    if link.is_empty() {
        SITE_ORIGIN.clone()
    } else if link.starts_with("//") {
        format!("https:{link}")
    } else if link.starts_with('/') {
        format!("{}{link}", SITE_ORIGIN.as_str())
    } else if !link.starts_with("http") {
        format!("https://{link}")
    } else {
        link.to_string()
    }
}

/// Apply the final cleaning gate, dedupe by title, and cap the list.
///
/// Candidates arrive in strategy order; that order is preserved. Titles are
/// re-cleaned here so the gate holds no matter which strategy produced the
/// candidate, then deduplicated by exact cleaned-title equality keeping the
/// first occurrence, and truncated to [`MAX_ITEMS`].
pub fn finalize(candidates: Vec<NewsItem>) -> Vec<NewsItem> {
    candidates
        .into_iter()
        .map(|mut item| {
            item.title = clean_title(&item.title);
            item
        })
        .filter(|item| item.title.chars().count() >= MIN_TITLE_CHARS)
        .unique_by(|item| item.title.clone())
        .take(MAX_ITEMS)
        .collect()
}
