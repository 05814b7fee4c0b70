//! Hot-news strategy: prioritized selectors over the homepage hot block.
//!
//! The selector table is ordered from the most specific markup the site has
//! been observed to serve down to loose class-substring guesses. The first
//! selector that contributes at least one surviving item wins and the rest
//! are skipped: selectors are alternatives for the same block, so taking
//! their union would double-collect it. A selector whose matches are all
//! filtered out (titles too short) falls through to the next one.

use crate::models::{NewsItem, NewsKind};
use crate::normalize;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

/// Ordered selector specs, most specific first.
pub const SELECTOR_SPECS: &[&str] = &[
    "#hotsearch-content-wrapper .hotsearch-item",
    ".s-hotsearch-title",
    ".hot-title",
    r#"[class*="hot"] a"#,
    r#"[class*="news"] a"#,
];

/// At most this many elements are harvested from the winning selector.
const MAX_PER_SELECTOR: usize = 10;

const SUMMARY: &str = "百度热点新闻";
const SOURCE: &str = "百度首页";

static SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    SELECTOR_SPECS
        .iter()
        .map(|spec| Selector::parse(spec).unwrap())
        .collect()
});

/// Harvest hot-news items from the parsed homepage.
///
/// Returns up to [`MAX_PER_SELECTOR`] items from the first productive
/// selector, or an empty list when none of them match anything usable.
pub fn extract(document: &Html) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for (spec, selector) in SELECTOR_SPECS.iter().zip(SELECTORS.iter()) {
        let matches: Vec<_> = document.select(selector).collect();
        debug!(selector = *spec, matches = matches.len(), "hot-news selector evaluated");

        for element in matches.into_iter().take(MAX_PER_SELECTOR) {
            let title = normalize::clean_title(&element.text().collect::<String>());
            if title.chars().count() < normalize::MIN_TITLE_CHARS {
                continue;
            }

            // List items carry no href of their own; those resolve to the
            // site root.
            let link = normalize::resolve_link(element.value().attr("href").unwrap_or(""));

            items.push(NewsItem {
                title,
                link,
                summary: SUMMARY.to_string(),
                source: SOURCE.to_string(),
                kind: NewsKind::Hot,
            });
        }

        if !items.is_empty() {
            break;
        }
    }

    items
}
