//! Homepage fetching.
//!
//! The job issues exactly one GET against the Baidu homepage per run, with a
//! browser-like header set: the page serves a stripped-down variant to
//! clients it does not recognize, which would starve the extraction cascade.
//!
//! The raw body is additionally written to [`SNAPSHOT_PATH`] so a run whose
//! extraction came up empty can be diagnosed against the markup it actually
//! saw. Response status is logged but not enforced: an error page still gets
//! fed to the cascade, and the fallback policy covers the empty result.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONNECTION, DNT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// The page the job scrapes.
pub const HOMEPAGE_URL: &str = "https://www.baidu.com/";

/// Where the raw markup of the last fetch is kept for inspection.
pub const SNAPSHOT_PATH: &str = "/tmp/baidu_homepage.html";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP client around the fixed homepage URL.
pub struct HomepageFetcher {
    client: Client,
    url: String,
}

impl HomepageFetcher {
    /// Build a fetcher for [`HOMEPAGE_URL`].
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_url(HOMEPAGE_URL)
    }

    /// Build a fetcher for an arbitrary URL (used by tests).
    pub fn with_url(url: &str) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
        );
        headers.insert(DNT, HeaderValue::from_static("1"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(FETCH_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Fetch the homepage and return the raw markup.
    ///
    /// Writes the body to [`SNAPSHOT_PATH`] as a side effect; a failed
    /// snapshot write is only a warning. Network and protocol errors are
    /// returned to the caller, which degrades to placeholder data.
    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<String, reqwest::Error> {
        info!("fetching homepage");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        info!(%status, bytes = body.len(), "homepage fetched");

        match fs::write(SNAPSHOT_PATH, &body).await {
            Ok(()) => debug!(path = SNAPSHOT_PATH, "markup snapshot written"),
            Err(e) => warn!(path = SNAPSHOT_PATH, error = %e, "could not write markup snapshot"),
        }

        Ok(body)
    }

    /// Quick connectivity check against the same URL.
    ///
    /// Used once at startup for log context only; the job proceeds to the
    /// real fetch whatever the outcome.
    pub async fn probe(&self) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .client
            .get(&self.url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await?;
        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_builds_for_default_url() {
        let fetcher = HomepageFetcher::new().unwrap();
        assert_eq!(fetcher.url, HOMEPAGE_URL);
    }

    #[tokio::test]
    async fn test_fetch_error_is_reported_not_panicked() {
        // Nothing listens on the discard port; the connection is refused
        // immediately and must surface as an Err.
        let fetcher = HomepageFetcher::with_url("http://127.0.0.1:9/").unwrap();
        assert!(fetcher.fetch().await.is_err());
    }
}
