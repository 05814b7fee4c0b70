//! Keyword link-filter strategy: a broad sweep over every hyperlink.
//!
//! Runs when the hot-news block came up short. Instead of guessing where
//! the news block moved to, this strategy scans all `a[href]` elements in
//! document order and keeps the ones whose text reads like a headline: a
//! plausible length and at least one term from a fixed news-vocabulary
//! table. Placeholder hrefs (`#`, `javascript:` handlers) are excluded.

use crate::models::{NewsItem, NewsKind};
use crate::normalize;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

/// Terms that mark a link text as news-like.
pub const NEWS_KEYWORDS: &[&str] = &[
    "新闻", "报道", "消息", "资讯", "热点", "最新", "今日",
    "疫情", "政策", "经济", "科技", "体育", "娱乐", "财经",
];

/// The sweep stops after this many matches.
const MAX_ITEMS: usize = 15;

/// Link text length window, in chars. Tighter floor than the global title
/// gate: two-character link labels are navigation, not headlines.
const MIN_TITLE_CHARS: usize = 5;
const MAX_TITLE_CHARS: usize = 100;

const SUMMARY: &str = "百度首页资讯";
const SOURCE: &str = "百度";

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Harvest news-like links from the parsed homepage.
pub fn extract(document: &Html) -> Vec<NewsItem> {
    let mut items = Vec::new();
    let mut scanned = 0usize;

    for element in document.select(&ANCHORS) {
        scanned += 1;

        let title = normalize::clean_title(&element.text().collect::<String>());
        let chars = title.chars().count();
        if chars < MIN_TITLE_CHARS || chars > MAX_TITLE_CHARS {
            continue;
        }
        if !NEWS_KEYWORDS.iter().any(|keyword| title.contains(keyword)) {
            continue;
        }

        let href = element.value().attr("href").unwrap_or("");
        if href.is_empty() || href == "#" || href.starts_with("javascript") {
            continue;
        }

        items.push(NewsItem {
            title,
            link: normalize::resolve_link(href),
            summary: SUMMARY.to_string(),
            source: SOURCE.to_string(),
            kind: NewsKind::Info,
        });

        if items.len() >= MAX_ITEMS {
            break;
        }
    }

    debug!(scanned, kept = items.len(), "keyword link sweep finished");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_keyword_links() {
        let html = r#"
            <a href="/news/1">今日经济新闻快讯</a>
            <a href="/about">关于我们页面介绍</a>
            <a href="/news/2">科技前沿最新报道</a>
        "#;
        let document = Html::parse_document(html);
        let items = extract(&document);

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["今日经济新闻快讯", "科技前沿最新报道"]);
        assert!(items.iter().all(|i| i.kind == NewsKind::Info));
    }

    #[test]
    fn test_length_window_applied() {
        let html = format!(
            r#"
            <a href="/a">新闻</a>
            <a href="/b">{}</a>
            <a href="/c">刚好五字闻新闻</a>
            "#,
            "新闻".repeat(51), // 102 chars, above the ceiling
        );
        let document = Html::parse_document(&html);
        let items = extract(&document);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "刚好五字闻新闻");
    }

    #[test]
    fn test_placeholder_hrefs_excluded() {
        let html = r##"
            <a href="#">今日热点新闻汇总</a>
            <a href="javascript:void(0)">最新体育消息速递</a>
            <a href="/ok">最新财经资讯要闻</a>
        "##;
        let document = Html::parse_document(html);
        let items = extract(&document);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://www.baidu.com/ok");
    }

    #[test]
    fn test_sweep_capped() {
        let mut html = String::new();
        for i in 0..30 {
            html.push_str(&format!(r#"<a href="/n/{i}">第{i}条今日新闻报道</a>"#));
        }
        let document = Html::parse_document(&html);
        assert_eq!(extract(&document).len(), MAX_ITEMS);
    }

    #[test]
    fn test_document_order_preserved() {
        let html = r#"
            <div><a href="/1">头条经济新闻一</a></div>
            <span><a href="/2">头条经济新闻二</a></span>
        "#;
        let document = Html::parse_document(html);
        let items = extract(&document);
        assert_eq!(items[0].link, "https://www.baidu.com/1");
        assert_eq!(items[1].link, "https://www.baidu.com/2");
    }
}
