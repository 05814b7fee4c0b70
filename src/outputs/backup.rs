//! Local plain-text backup of the collected items.
//!
//! Written after every delivery attempt, successful or not, so a run whose
//! email never arrived still leaves the day's items on disk. Files are
//! keyed by timestamp and never overwritten or cleaned up here.

use crate::models::NewsItem;
use chrono::Local;
use std::error::Error;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Directory the timestamp-named backup files land in.
pub const BACKUP_DIR: &str = "/home/send_news/backups";

/// Write the items to a timestamp-named text file under `dir`.
///
/// Creates the directory if it is missing and returns the path of the
/// written file. Layout: a header line with the backup time, a rule, then
/// one numbered block per item with its link and source.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn save_backup(items: &[NewsItem], dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(dir).await?;

    let now = Local::now();
    let path = dir.join(format!("baidu_homepage_news_{}.txt", now.format("%Y%m%d_%H%M%S")));

    let mut body = String::new();
    let _ = writeln!(body, "百度首页新闻备份 {}", now.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(body, "{}", "=".repeat(50));
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(body, "{}. {}", i + 1, item.title);
        let _ = writeln!(body, "   链接: {}", item.link);
        let _ = writeln!(body, "   来源: {}", item.source);
        let _ = writeln!(body, "{}", "-".repeat(30));
    }

    fs::write(&path, body).await?;
    info!(path = %path.display(), count = items.len(), "news backup written");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsKind;

    fn item(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: "https://www.baidu.com/x".to_string(),
            summary: "百度热点新闻".to_string(),
            source: "百度首页".to_string(),
            kind: NewsKind::Hot,
        }
    }

    #[tokio::test]
    async fn test_backup_layout() {
        let dir = tempfile::tempdir().unwrap();
        let items = vec![item("备份标题一"), item("备份标题二")];

        let path = save_backup(&items, dir.path()).await.unwrap();
        let body = std::fs::read_to_string(&path).unwrap();

        assert!(body.starts_with("百度首页新闻备份 "));
        assert!(body.contains(&"=".repeat(50)));
        assert!(body.contains("1. 备份标题一"));
        assert!(body.contains("2. 备份标题二"));
        assert!(body.contains("   链接: https://www.baidu.com/x"));
        assert!(body.contains("   来源: 百度首页"));
        assert!(body.contains(&"-".repeat(30)));
    }

    #[tokio::test]
    async fn test_backup_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("news").join("backups");

        let path = save_backup(&[item("唯一条目")], &nested).await.unwrap();

        assert!(path.starts_with(&nested));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("baidu_homepage_news_"));
        assert!(name.ends_with(".txt"));
    }

    #[tokio::test]
    async fn test_empty_list_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_backup(&[], dir.path()).await.unwrap();
        let body = std::fs::read_to_string(&path).unwrap();

        assert!(body.starts_with("百度首页新闻备份 "));
        assert!(!body.contains("1. "));
    }
}
