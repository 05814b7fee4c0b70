//! The heuristic extraction cascade.
//!
//! The homepage publishes no stable schema, so candidate items are pulled
//! out of its markup by three ordered strategies, each a pure function over
//! the parsed document:
//!
//! | Order | Strategy | Module | Runs when |
//! |-------|----------|--------|-----------|
//! | A | hot-news selectors | [`hot_news`] | always |
//! | B | keyword link sweep | [`keyword_links`] | fewer than [`MIN_ITEMS`] so far |
//! | C | hot-search board | [`hot_search`] | still fewer than [`MIN_ITEMS`] |
//!
//! Strategy results are appended in order, never merged or ranked, and the
//! gates compare against the cascade's cumulative count rather than any
//! per-strategy count. The combined list then passes through
//! [`normalize::finalize`]; if everything came up empty (or the fetch
//! itself failed), a single placeholder item stands in so the rest of the
//! job still has something to deliver.

pub mod hot_news;
pub mod hot_search;
pub mod keyword_links;

use crate::fetch::HomepageFetcher;
use crate::models::NewsItem;
use crate::normalize;
use chrono::Local;
use scraper::Html;
use tracing::{error, info, instrument, warn};

/// Strategies B and C only run while the cascade holds fewer items than this.
pub const MIN_ITEMS: usize = 5;

/// Run the cascade over raw markup and finalize the candidate list.
///
/// Pure with respect to I/O; tests feed synthetic fixtures here. The result
/// may be empty: the placeholder substitution happens in [`collect`].
pub fn collect_from_html(html: &str) -> Vec<NewsItem> {
    let document = Html::parse_document(html);

    let mut candidates = hot_news::extract(&document);
    info!(count = candidates.len(), "hot-news strategy finished");

    if candidates.len() < MIN_ITEMS {
        info!("hot news came up short; sweeping keyword links");
        candidates.extend(keyword_links::extract(&document));
    }

    if candidates.len() < MIN_ITEMS {
        info!("still short; consulting the hot-search board");
        candidates.extend(hot_search::extract(&document));
    }

    normalize::finalize(candidates)
}

/// Fetch the homepage and collect news items.
///
/// Never returns an empty list: a failed fetch or an empty extraction is
/// replaced by the single placeholder item, deferring failure signaling to
/// the delivery stage.
#[instrument(level = "info", skip_all)]
pub async fn collect(fetcher: &HomepageFetcher) -> Vec<NewsItem> {
    let items = match fetcher.fetch().await {
        Ok(html) => collect_from_html(&html),
        Err(e) => {
            error!(error = %e, "homepage fetch failed; degrading to placeholder data");
            Vec::new()
        }
    };

    if items.is_empty() {
        warn!("no news items collected; substituting the placeholder item");
        return vec![NewsItem::placeholder(Local::now())];
    }

    info!(count = items.len(), "news items collected");
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsKind;
    use crate::outputs::html::render_digest;

    #[test]
    fn test_productive_hot_block_suppresses_later_strategies() {
        // Five hot items satisfy the cumulative gate, so neither the
        // keyword link nor the board probe may show up.
        let html = r#"
            <ul id="hotsearch-content-wrapper">
                <li class="hotsearch-item">热点标题一号</li>
                <li class="hotsearch-item">热点标题二号</li>
                <li class="hotsearch-item">热点标题三号</li>
                <li class="hotsearch-item">热点标题四号</li>
                <li class="hotsearch-item">热点标题五号</li>
            </ul>
            <div class="links"><a href="/b">今日财经新闻速递</a></div>
            <div class="rank-board">榜单探针条目</div>
        "#;
        let items = collect_from_html(html);

        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| i.kind == NewsKind::Hot));
        assert!(items.iter().all(|i| i.title != "今日财经新闻速递"));
        assert!(items.iter().all(|i| i.title != "榜单探针条目"));
    }

    #[test]
    fn test_keyword_sweep_runs_when_hot_block_missing() {
        let html = r#"
            <div class="links">
                <a href="/news/a">今日经济新闻要点</a>
                <a href="/news/b">最新科技资讯汇总</a>
            </div>
        "#;
        let items = collect_from_html(html);

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["今日经济新闻要点", "最新科技资讯汇总"]);
        assert!(items.iter().all(|i| i.kind == NewsKind::Info));
    }

    #[test]
    fn test_gates_compare_cumulative_count() {
        // Three hot items plus two keyword links reach the threshold
        // together, so the board probe must stay out even though its
        // markup is present.
        let html = r#"
            <ul id="hotsearch-content-wrapper">
                <li class="hotsearch-item">热点甲条目</li>
                <li class="hotsearch-item">热点乙条目</li>
                <li class="hotsearch-item">热点丙条目</li>
            </ul>
            <div class="links">
                <a href="/n/1">今日体育新闻集锦</a>
                <a href="/n/2">最新娱乐资讯速览</a>
            </div>
            <div class="rank-board">榜单探针条目</div>
        "#;
        let items = collect_from_html(html);

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "热点甲条目",
                "热点乙条目",
                "热点丙条目",
                "今日体育新闻集锦",
                "最新娱乐资讯速览",
            ],
        );
        assert!(items.iter().all(|i| i.title != "榜单探针条目"));
    }

    #[test]
    fn test_unproductive_first_selector_falls_through_before_gating() {
        // The wrapper matches but its only title is below the floor, so the
        // hot pass falls through to a later selector; those three plus two
        // keyword links reach the threshold and the board stays out.
        let html = r#"
            <ul id="hotsearch-content-wrapper">
                <li class="hotsearch-item">短</li>
            </ul>
            <div class="hot-title">焦点标题甲</div>
            <div class="hot-title">焦点标题乙</div>
            <div class="hot-title">焦点标题丙</div>
            <div class="links">
                <a href="/k/1">今日财经新闻精选</a>
                <a href="/k/2">最新体育资讯集锦</a>
            </div>
            <div class="rank-board">榜单探针条目</div>
        "#;
        let items = collect_from_html(html);

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "焦点标题甲",
                "焦点标题乙",
                "焦点标题丙",
                "今日财经新闻精选",
                "最新体育资讯集锦",
            ],
        );
        assert!(items[..3].iter().all(|i| i.kind == NewsKind::Hot));
        assert!(items[3..].iter().all(|i| i.kind == NewsKind::Info));
        assert!(items.iter().all(|i| i.title != "榜单探针条目"));
    }

    #[test]
    fn test_board_consulted_when_both_earlier_strategies_fail() {
        let html = r#"
            <div class="hotsearch-item">热搜词条一号</div>
            <div class="hotsearch-item">热搜词条二号</div>
        "#;
        let items = collect_from_html(html);

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.kind == NewsKind::Trending));
        // No anchors anywhere, so both fall back to search links.
        assert!(items.iter().all(|i| i.link.starts_with("https://www.baidu.com/s?wd=")));
    }

    #[test]
    fn test_at_most_ten_items_each_with_cleaned_title() {
        let mut html = String::from(r#"<ul id="hotsearch-content-wrapper">"#);
        for i in 0..15 {
            html.push_str(&format!(r#"<li class="hotsearch-item">热点条目{i}</li>"#));
        }
        html.push_str("</ul>");

        let items = collect_from_html(&html);
        assert_eq!(items.len(), normalize::MAX_ITEMS);
        assert!(items.iter().all(|i| i.title.chars().count() >= normalize::MIN_TITLE_CHARS));
    }

    #[test]
    fn test_empty_document_collects_nothing() {
        assert!(collect_from_html("<p>无关内容</p>").is_empty());
        assert!(collect_from_html("").is_empty());
    }

    #[test]
    fn test_hot_block_fixture_end_to_end() {
        let html = r#"
            <div id="hotsearch-content-wrapper">
                <a class="hotsearch-item" href="/s?wd=第一">头条新闻第一条</a>
                <a class="hotsearch-item" href="//m.baidu.com/second">头条新闻第二条</a>
                <a class="hotsearch-item" href="https://news.baidu.com/third">头条新闻第三条</a>
            </div>
        "#;
        let items = collect_from_html(html);

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["头条新闻第一条", "头条新闻第二条", "头条新闻第三条"]);

        let links: Vec<&str> = items.iter().map(|i| i.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://www.baidu.com/s?wd=第一",
                "https://m.baidu.com/second",
                "https://news.baidu.com/third",
            ],
        );

        // The keyword sweep re-finds the same anchors (the titles carry
        // 新闻); dedup must keep only the hot-news copies.
        assert!(items.iter().all(|i| i.kind == NewsKind::Hot));

        let rendered = render_digest(&items, Local::now());
        for title in titles {
            assert!(rendered.contains(title));
        }
        assert!(rendered.contains("今日新闻数量：3条"));
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_placeholder() {
        // Nothing listens on the discard port, so the fetch errors out and
        // the cascade never runs.
        let fetcher = HomepageFetcher::with_url("http://127.0.0.1:9/").unwrap();
        let items = collect(&fetcher).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, NewsKind::Placeholder);
        assert_eq!(items[0].link, "https://www.baidu.com");
    }
}
