//! # Baidu News Digest
//!
//! A single-shot job that fetches the Baidu homepage, pulls candidate news
//! items out of its markup with a cascade of heuristic selectors, and
//! delivers the result as an HTML digest by email.
//!
//! ## Features
//!
//! - Browser-like fetch of `www.baidu.com` with a debug snapshot of the raw
//!   markup for post-hoc inspection
//! - Three-strategy extraction cascade (hot-news selectors, keyword link
//!   sweep, hot-search board) over the unversioned homepage markup
//! - Title cleaning, link resolution, stable dedup, cap at 10 items
//! - Self-contained HTML digest with inlined styling
//! - SMTP delivery with bounded retry; authentication failures and
//!   incomplete configuration fail fast
//! - Timestamped plain-text backup of the items, written either way
//!
//! ## Usage
//!
//! ```sh
//! baidu_news_digest   # typically from a daily cron entry
//! ```
//!
//! There are no flags; delivery settings come from `email_config.json` in
//! the working directory and the log filter from `RUST_LOG`. Exit code 0
//! means the digest was emailed; 1 means it was not (the collected items
//! are still backed up locally).
//!
//! ## Architecture
//!
//! The job is a single sequential pipeline:
//! 1. **Probe**: quick connectivity check against the homepage (log only)
//! 2. **Collect**: fetch and run the extraction cascade; a failed fetch or
//!    empty extraction degrades to one placeholder item
//! 3. **Render**: build the digest subject and HTML body
//! 4. **Deliver**: send over SMTP with up to 3 attempts
//! 5. **Backup**: write the plain-text backup regardless of delivery

use chrono::Local;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, instrument, warn};

mod config;
mod extract;
mod fetch;
mod logging;
mod mailer;
mod models;
mod normalize;
mod outputs;

use config::EmailConfig;
use fetch::HomepageFetcher;

#[tokio::main]
async fn main() -> ExitCode {
    let _guard = logging::init();

    let start_time = std::time::Instant::now();
    info!("baidu_news_digest starting up");

    let outcome = run().await;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "job failed");
            ExitCode::FAILURE
        }
    }
}

#[instrument(level = "info", skip_all)]
async fn run() -> Result<(), Box<dyn Error>> {
    let fetcher = HomepageFetcher::new()?;

    // Connectivity check is informational; collection proceeds regardless.
    match fetcher.probe().await {
        Ok(status) => info!(%status, "connectivity check passed"),
        Err(e) => warn!(error = %e, "connectivity check failed; attempting collection anyway"),
    }

    // Never empty: the fallback policy substitutes a placeholder item.
    let items = extract::collect(&fetcher).await;
    for (i, item) in items.iter().enumerate() {
        info!(rank = i + 1, title = %item.title, "collected");
    }

    let now = Local::now();
    let subject = outputs::html::digest_subject(&items, now);
    let body = outputs::html::render_digest(&items, now);

    let email_config = EmailConfig::load(Path::new(config::CONFIG_PATH));
    let delivery = mailer::send_digest(&email_config, &subject, &body).await;

    if let Err(e) = outputs::backup::save_backup(&items, Path::new(outputs::backup::BACKUP_DIR)).await {
        error!(error = %e, "failed to write the news backup");
    }

    match delivery {
        Ok(()) => {
            info!("digest delivered");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "digest not delivered; items collected and backed up");
            Err(e.into())
        }
    }
}
