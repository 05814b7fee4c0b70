//! Data models for collected news items.
//!
//! This module defines the core data structures used throughout the job:
//! - [`NewsItem`]: A single candidate news entry harvested from the homepage
//! - [`NewsKind`]: The badge shown next to an item, reflecting which
//!   extraction strategy produced it
//!
//! Items are created by the extraction cascade and are immutable afterwards;
//! the renderer and the backup writer only read them. There is no identity
//! across runs: within one run, items are unique by title text.

use chrono::{DateTime, Local};
use std::fmt;

/// The strategy-derived category of a news item.
///
/// The variants map to the Chinese badges shown in the digest email and in
/// the backup file:
///
/// | Variant | Badge | Produced by |
/// |---------|-------|-------------|
/// | `Hot` | 热点 | hot-news selectors |
/// | `Info` | 资讯 | keyword link filter |
/// | `Trending` | 热搜 | hot-search list selectors |
/// | `Placeholder` | 示例 | fallback when nothing was collected |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsKind {
    /// Homepage hot-news block.
    Hot,
    /// Hot-search (trending) list.
    Trending,
    /// Generic news-like link found by keyword filtering.
    Info,
    /// Synthetic fallback item produced when collection failed.
    Placeholder,
}

impl NewsKind {
    /// The Chinese badge text for this kind.
    pub fn label(self) -> &'static str {
        match self {
            NewsKind::Hot => "热点",
            NewsKind::Trending => "热搜",
            NewsKind::Info => "资讯",
            NewsKind::Placeholder => "示例",
        }
    }
}

impl fmt::Display for NewsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate news entry harvested from homepage markup.
///
/// # Fields
///
/// * `title` - Cleaned headline text (whitespace collapsed, at least 3 chars)
/// * `link` - Absolute URL for the item; the renderer substitutes `#` when
///   it is empty
/// * `summary` - Short fixed description attached by the producing strategy
/// * `source` - Where the item was found (e.g. 百度首页, 百度热搜榜)
/// * `kind` - The producing strategy's badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    /// Cleaned headline text.
    pub title: String,
    /// Absolute URL pointing at the story or search page.
    pub link: String,
    /// Short description attached by the producing strategy.
    pub summary: String,
    /// Human-readable origin of the item.
    pub source: String,
    /// Which strategy produced the item.
    pub kind: NewsKind,
}

impl NewsItem {
    /// Build the synthetic fallback item used when collection fails.
    ///
    /// The job never reports an empty collection: if the fetch errors out or
    /// every strategy comes up empty, this single placeholder stands in so
    /// that rendering and delivery still run and failure surfaces at the
    /// delivery stage instead.
    pub fn placeholder(now: DateTime<Local>) -> Self {
        Self {
            title: "百度首页热点新闻".to_string(),
            link: crate::normalize::resolve_link(""),
            summary: format!("当前时间 {} 的首页新闻", now.format("%H:%M")),
            source: "百度首页".to_string(),
            kind: NewsKind::Placeholder,
        }
    }
}
