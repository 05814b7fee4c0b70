//! HTML digest rendering.
//!
//! Pure functions from the collected items to the email's subject line and
//! its body: a self-contained document with inlined styling, no external
//! resources, so it renders the same in any mail client. Item text comes
//! out of third-party markup and is escaped before interpolation.

use crate::models::NewsItem;
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Subject line for the digest email.
pub fn digest_subject(items: &[NewsItem], now: DateTime<Local>) -> String {
    format!(
        "🔍 百度首页新闻TOP{} {}",
        items.len(),
        now.format("%Y年%m月%d日")
    )
}

/// Render the digest document for the given items.
///
/// Layout: a header block with the generation time and item count, one
/// block per item (1-based rank, title, kind badge, source, summary,
/// outbound link), and a footer crediting the data source. An item without
/// a link points at `#`; an empty list renders the header alone.
pub fn render_digest(items: &[NewsItem], generated_at: DateTime<Local>) -> String {
    let mut item_blocks = String::new();
    for (i, item) in items.iter().enumerate() {
        let link = if item.link.is_empty() { "#" } else { item.link.as_str() };
        let _ = write!(
            item_blocks,
            r#"
        <div class="news-item">
            <span class="news-rank">{rank}</span>
            <div class="news-title">{title} <span class="news-type">{kind}</span></div>
            <div class="news-meta">
                📍 来源：<span class="baidu-logo">{source}</span>
            </div>
            <div class="news-summary">{summary}</div>
            <a href="{link}" class="news-link" target="_blank">📖 查看详情 →</a>
        </div>
"#,
            rank = i + 1,
            title = html_escape(&item.title),
            kind = item.kind.label(),
            source = html_escape(&item.source),
            summary = html_escape(&item.summary),
            link = html_escape(link),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>
        body {{ font-family: "Microsoft YaHei", Arial, sans-serif; line-height: 1.6; color: #333; background-color: #f5f7fa; }}
        .container {{ max-width: 800px; margin: 0 auto; padding: 20px; background-color: white; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
        .header {{ background: linear-gradient(135deg, #2932e1 0%, #1a237e 100%); color: white; padding: 25px; border-radius: 8px; margin-bottom: 25px; text-align: center; }}
        .header h1 {{ margin: 0 0 10px 0; font-size: 28px; }}
        .header p {{ margin: 5px 0; opacity: 0.9; }}
        .news-item {{ border-left: 5px solid #2932e1; padding: 18px; margin-bottom: 18px; background-color: #f8f9fa; border-radius: 0 8px 8px 0; transition: all 0.3s; }}
        .news-item:hover {{ transform: translateX(5px); box-shadow: 0 4px 12px rgba(0,0,0,0.1); }}
        .news-rank {{ display: inline-block; width: 28px; height: 28px; line-height: 28px; text-align: center; background-color: #2932e1; color: white; border-radius: 50%; font-weight: bold; margin-right: 12px; }}
        .news-title {{ display: inline-block; font-size: 18px; font-weight: bold; margin-bottom: 10px; color: #2c3e50; }}
        .news-meta {{ color: #666; font-size: 14px; margin-bottom: 8px; }}
        .news-type {{ display: inline-block; background-color: #ff6b6b; color: white; padding: 2px 8px; border-radius: 12px; font-size: 12px; margin-left: 10px; }}
        .news-summary {{ color: #444; line-height: 1.7; margin-bottom: 12px; }}
        .news-link {{ color: #2932e1; text-decoration: none; font-weight: bold; display: inline-block; margin-top: 8px; }}
        .news-link:hover {{ text-decoration: underline; }}
        .footer {{ margin-top: 40px; padding-top: 20px; border-top: 1px solid #eee; color: #7f8c8d; font-size: 13px; text-align: center; }}
        .baidu-logo {{ color: #2932e1; font-weight: bold; }}
        .time-badge {{ background-color: #e3f2fd; color: #1565c0; padding: 4px 12px; border-radius: 15px; font-size: 14px; display: inline-block; margin-left: 10px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🔍 百度首页新闻推送</h1>
            <p>📅 推送时间：{generated} <span class="time-badge">实时更新</span></p>
            <p>📊 今日新闻数量：{count}条</p>
        </div>
{item_blocks}
        <div class="footer">
            <p>数据来源：百度首页(www.baidu.com)</p>
            <p>发送时间：{sent_at}</p>
            <p>💡 百度首页实时更新，反映当前最受关注的新闻事件</p>
        </div>
    </div>
</body>
</html>"#,
        generated = generated_at.format("%Y年%m月%d日 %H:%M"),
        count = items.len(),
        item_blocks = item_blocks,
        sent_at = generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Minimal escaping for text scraped out of third-party markup.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
