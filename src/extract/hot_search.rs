//! Hot-search board strategy: the wide-net fallback of the cascade.
//!
//! Looser selectors than the hot-news pass, including substring class
//! matches for anything rank- or hotsearch-flavored. Entries on the board
//! often carry no hyperlink at all, so a missing anchor falls back to a
//! Baidu search URL built from the title itself. Unlike the first pass,
//! this one keeps accumulating across selectors until it has enough.

use crate::models::{NewsItem, NewsKind};
use crate::normalize;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Selectors tried in order, results accumulated across all of them.
pub const SELECTOR_SPECS: &[&str] = &[
    ".hotsearch-item",
    ".s-news-rank-content .title-content",
    r#"[class*="rank"]"#,
    r#"[class*="hotsearch"]"#,
];

/// Per-selector harvest cap.
const MAX_PER_SELECTOR: usize = 15;

/// Accumulation stops once the strategy holds this many items.
const TARGET_ITEMS: usize = 5;

/// Search fallback for board entries without an anchor.
const SEARCH_URL: &str = "https://www.baidu.com/s?wd=";

const SUMMARY: &str = "百度热搜";
const SOURCE: &str = "百度热搜榜";

static SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    SELECTOR_SPECS
        .iter()
        .map(|spec| Selector::parse(spec).unwrap())
        .collect()
});

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Link for a board entry: its first descendant anchor when present,
/// otherwise a search query for the title.
fn entry_link(element: ElementRef<'_>, title: &str) -> String {
    match element.select(&ANCHOR).next() {
        Some(anchor) => normalize::resolve_link(anchor.value().attr("href").unwrap_or("")),
        None => format!("{SEARCH_URL}{}", urlencoding::encode(title)),
    }
}

/// Harvest hot-search board entries from the parsed homepage.
pub fn extract(document: &Html) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for (spec, selector) in SELECTOR_SPECS.iter().zip(SELECTORS.iter()) {
        for element in document.select(selector).take(MAX_PER_SELECTOR) {
            let title = normalize::clean_title(&element.text().collect::<String>());
            if title.chars().count() < normalize::MIN_TITLE_CHARS {
                continue;
            }

            let link = entry_link(element, &title);
            items.push(NewsItem {
                title,
                link,
                summary: SUMMARY.to_string(),
                source: SOURCE.to_string(),
                kind: NewsKind::Trending,
            });
        }

        debug!(selector = *spec, running = items.len(), "hot-search selector done");
        if items.len() >= TARGET_ITEMS {
            break;
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchorless_entry_gets_search_link() {
        let html = r#"<div class="hotsearch-item">某地暴雨预警</div>"#;
        let document = Html::parse_document(html);
        let items = extract(&document);

        // Both the exact and the class-substring selector find this entry;
        // the duplicate is collapsed downstream.
        assert_eq!(items.len(), 2);
        for item in &items {
            assert_eq!(
                item.link,
                format!("{SEARCH_URL}{}", urlencoding::encode("某地暴雨预警")),
            );
            assert_eq!(item.kind, NewsKind::Trending);
        }
    }

    #[test]
    fn test_descendant_anchor_wins_over_search_link() {
        let html = r#"
            <div class="hotsearch-item">
                <a href="/s?wd=abc">词条带链接</a>
            </div>
        "#;
        let document = Html::parse_document(html);
        let items = extract(&document);

        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i.link == "https://www.baidu.com/s?wd=abc"));
    }

    #[test]
    fn test_entry_that_is_itself_an_anchor_gets_search_link() {
        // Link lookup is descendants-only; an entry that is itself an
        // anchor ignores its own href.
        let html = r#"<a class="rank-entry" href="/article/9">自链词条样例</a>"#;
        let document = Html::parse_document(html);
        let items = extract(&document);

        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].link,
            format!("{SEARCH_URL}{}", urlencoding::encode("自链词条样例")),
        );
    }

    #[test]
    fn test_hrefless_descendant_anchor_resolves_to_site_root() {
        let html = r#"
            <div class="hotsearch-item">
                <a>词条没有链接</a>
            </div>
        "#;
        let document = Html::parse_document(html);
        let items = extract(&document);

        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i.link == "https://www.baidu.com"));
    }

    #[test]
    fn test_accumulates_across_selectors_until_target() {
        // Two board entries are below the target, so the rank-flavored
        // selector is consulted as well.
        let html = r#"
            <div class="hotsearch-item">词条甲甲甲</div>
            <div class="hotsearch-item">词条乙乙乙</div>
            <div class="rank-block">排行条目丙</div>
        "#;
        let document = Html::parse_document(html);
        let items = extract(&document);

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert!(titles.contains(&"词条甲甲甲"));
        assert!(titles.contains(&"排行条目丙"));
    }

    #[test]
    fn test_stops_once_target_reached() {
        let html = r#"
            <div class="hotsearch-item">词条一一一</div>
            <div class="hotsearch-item">词条二二二</div>
            <div class="hotsearch-item">词条三三三</div>
            <div class="hotsearch-item">词条四四四</div>
            <div class="hotsearch-item">词条五五五</div>
            <div class="rank-block">不该出现的条目</div>
        "#;
        let document = Html::parse_document(html);
        let items = extract(&document);

        assert!(items.iter().all(|i| i.title != "不该出现的条目"));
    }

    #[test]
    fn test_short_titles_skipped() {
        let html = r#"<div class="hotsearch-item">xy</div>"#;
        let document = Html::parse_document(html);
        assert!(extract(&document).is_empty());
    }
}
