//! Email delivery configuration.
//!
//! The job reads `email_config.json` from its working directory once per
//! run. A missing or unreadable file falls back to [`EmailConfig::default`],
//! whose empty credentials make delivery fail deliberately at the
//! precondition check instead of silently sending nowhere. Configuration is
//! never mutated after load.
//!
//! # File format
//!
//! ```json
//! {
//!     "smtp_server": "smtp.qq.com",
//!     "smtp_port": 465,
//!     "sender_email": "me@example.com",
//!     "sender_password": "app-password",
//!     "receiver_email": "you@example.com",
//!     "use_ssl": true,
//!     "use_tls": false
//! }
//! ```
//!
//! Keys may be omitted individually; the port defaults to 465 and the TLS
//! flags to `false`.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Where the job looks for its delivery configuration.
pub const CONFIG_PATH: &str = "email_config.json";

fn default_smtp_port() -> u16 {
    465
}

/// SMTP connection and addressing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP server hostname.
    #[serde(default)]
    pub smtp_server: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Sender address, also used as the login username.
    #[serde(default)]
    pub sender_email: String,
    /// Login password (usually a provider app password, not the account one).
    #[serde(default)]
    pub sender_password: String,
    /// Recipient address.
    #[serde(default)]
    pub receiver_email: String,
    /// Connect with implicit TLS (SMTPS).
    #[serde(default)]
    pub use_ssl: bool,
    /// Upgrade a plaintext connection via STARTTLS.
    #[serde(default)]
    pub use_tls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.qq.com".to_string(),
            smtp_port: 465,
            sender_email: String::new(),
            sender_password: String::new(),
            receiver_email: String::new(),
            use_ssl: true,
            use_tls: false,
        }
    }
}

impl EmailConfig {
    /// Load configuration from `path`, falling back to the default.
    ///
    /// This never fails: a missing file or invalid JSON is logged as a
    /// warning and replaced by [`EmailConfig::default`], which downstream
    /// fails the delivery precondition rather than attempting to send.
    pub fn load(path: &Path) -> EmailConfig {
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded email configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid email configuration; using defaults");
                    EmailConfig::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "email configuration not readable; using defaults");
                EmailConfig::default()
            }
        }
    }

    /// The first addressing/credential field that is empty, if any.
    ///
    /// Delivery requires sender, password, and receiver; a `Some` here means
    /// the send is aborted before the first attempt.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.sender_email.is_empty() {
            Some("sender_email")
        } else if self.sender_password.is_empty() {
            Some("sender_password")
        } else if self.receiver_email.is_empty() {
            Some("receiver_email")
        } else {
            None
        }
    }
}
