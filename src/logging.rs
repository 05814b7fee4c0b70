//! Process-wide logging setup.
//!
//! Events go to stdout and, when the file can be opened, to [`LOG_PATH`] as
//! well, so a cron-driven run leaves a trail even when nobody captures its
//! output. Components only emit `tracing` events; the sink is configured
//! here once, at startup.

use std::path::Path;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Where the job appends its log lines, alongside stdout.
pub const LOG_PATH: &str = "/var/log/baidu_homepage_news.log";

/// Install the global subscriber: stdout plus the log file.
///
/// The filter defaults to `info` and honors `RUST_LOG`. If the log file
/// cannot be opened (typically: not running as a user that may write under
/// `/var/log`) the job degrades to stdout-only rather than failing.
///
/// The returned guard owns the non-blocking file writer; hold it for the
/// process lifetime so buffered lines are flushed on exit.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(UtcTime::rfc_3339());

    let log_path = Path::new(LOG_PATH);
    let appender = match (log_path.parent(), log_path.file_name()) {
        (Some(dir), Some(name)) => RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(name.to_string_lossy())
            .build(dir)
            .map_err(|e| e.to_string()),
        _ => Err("log path has no parent directory".to_string()),
    };

    match appender {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(writer);

            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        Err(reason) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .init();
            warn!(path = LOG_PATH, %reason, "log file unavailable; logging to stdout only");
            None
        }
    }
}
