//! SMTP delivery with bounded retry.
//!
//! The digest is sent as a multipart message carrying only an HTML body.
//! Delivery is a small state machine: ATTEMPT, then SUCCESS or RETRY up to
//! [`MAX_ATTEMPTS`], then FAILURE. Two failure classes never reach the
//! retry loop at all:
//!
//! - an incomplete configuration (empty sender, password, or receiver)
//!   aborts before the first attempt;
//! - an authentication rejection from the server ends the loop immediately,
//!   since resending the same credentials cannot succeed.
//!
//! Everything else (connection refused, timeouts, transient server
//! responses) is retried with linearly growing backoff.
//!
//! # Architecture
//!
//! The attempt itself sits behind the [`DeliverOnce`] trait: [`SmtpMailer`]
//! is the real implementation, building a fresh `lettre` transport per
//! attempt, while [`RetrySend`] is a decorator that drives any
//! implementation through the retry policy. Tests script the trait to
//! exercise the policy without a network.

use crate::config::EmailConfig;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::{Category, Severity};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Attempts per delivery, counting the first one.
pub const MAX_ATTEMPTS: usize = 3;

/// Linear backoff unit: the n-th failed attempt waits n times this.
pub const BACKOFF_UNIT: Duration = Duration::from_secs(3);

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a delivery did not happen.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// A required addressing or credential field is empty.
    #[error("email configuration incomplete: {0} is empty")]
    IncompleteConfig(&'static str),

    /// The server rejected our credentials; retrying cannot help.
    #[error("SMTP authentication rejected: {0}")]
    Auth(String),

    /// A single attempt failed for a reason worth retrying.
    #[error("delivery attempt failed: {0}")]
    Send(String),

    /// Every attempt failed.
    #[error("delivery failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: usize, last: String },
}

impl DeliveryError {
    /// Whether a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DeliveryError::Send(_))
    }
}

/// One delivery attempt, independent of the retry policy.
///
/// [`RetrySend`] drives implementations of this trait; tests substitute
/// scripted ones so the attempt loop is exercised without opening an SMTP
/// session.
pub trait DeliverOnce {
    /// Perform a single delivery attempt.
    async fn deliver(&self) -> Result<(), DeliveryError>;
}

/// Decorator that drives a [`DeliverOnce`] through the retry policy.
pub struct RetrySend<T> {
    inner: T,
    max_attempts: usize,
    backoff_unit: Duration,
}

impl<T> RetrySend<T>
where
    T: DeliverOnce,
{
    /// Wrap `inner` with up to `max_attempts` attempts and linear backoff.
    pub fn new(inner: T, max_attempts: usize, backoff_unit: Duration) -> Self {
        Self {
            inner,
            max_attempts,
            backoff_unit,
        }
    }

    /// Run the attempt loop to success or a terminal failure.
    #[instrument(level = "info", skip_all)]
    pub async fn send(&self) -> Result<(), DeliveryError> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            info!(attempt, max = self.max_attempts, "delivery attempt");
            match self.inner.deliver().await {
                Ok(()) => {
                    info!(attempt, "email sent");
                    return Ok(());
                }
                Err(e) if !e.is_retryable() => {
                    error!(attempt, error = %e, "terminal delivery error; not retrying");
                    return Err(e);
                }
                Err(e) => {
                    warn!(attempt, max = self.max_attempts, error = %e, "delivery attempt failed");
                    last_error = e.to_string();
                    if attempt < self.max_attempts {
                        let delay = self.backoff_unit * attempt as u32;
                        info!(?delay, "backing off before next attempt");
                        sleep(delay).await;
                    }
                }
            }
        }

        error!(attempts = self.max_attempts, "delivery retries exhausted");
        Err(DeliveryError::RetriesExhausted {
            attempts: self.max_attempts,
            last: last_error,
        })
    }
}

/// The real SMTP attempt: a fresh transport and message per call.
pub struct SmtpMailer {
    config: EmailConfig,
    subject: String,
    html_body: String,
}

impl SmtpMailer {
    /// Build a mailer for one rendered digest.
    pub fn new(config: EmailConfig, subject: String, html_body: String) -> Self {
        Self {
            config,
            subject,
            html_body,
        }
    }

    /// The digest message: multipart with a single HTML part.
    fn message(&self) -> Result<Message, DeliveryError> {
        let from: Mailbox = self
            .config
            .sender_email
            .parse()
            .map_err(|e| DeliveryError::Send(format!("invalid sender address: {e}")))?;
        let to: Mailbox = self
            .config
            .receiver_email
            .parse()
            .map_err(|e| DeliveryError::Send(format!("invalid receiver address: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.as_str())
            .multipart(
                MultiPart::alternative().singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(self.html_body.clone()),
                ),
            )
            .map_err(|e| DeliveryError::Send(format!("could not build message: {e}")))
    }

    /// Transport per the configured connection mode: implicit TLS, a
    /// plaintext connection upgraded via STARTTLS, or bare plaintext.
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let credentials = Credentials::new(
            self.config.sender_email.clone(),
            self.config.sender_password.clone(),
        );

        let builder = if self.config.use_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_server)
        } else if self.config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)
        } else {
            Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                &self.config.smtp_server,
            ))
        }
        .map_err(|e| DeliveryError::Send(format!("could not configure SMTP transport: {e}")))?;

        Ok(builder
            .port(self.config.smtp_port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }
}

impl DeliverOnce for SmtpMailer {
    async fn deliver(&self) -> Result<(), DeliveryError> {
        let message = self.message()?;
        let transport = self.transport()?;

        info!(
            server = %self.config.smtp_server,
            port = self.config.smtp_port,
            ssl = self.config.use_ssl,
            tls = self.config.use_tls,
            "connecting to SMTP server"
        );

        match transport.send(message).await {
            Ok(response) => {
                debug!(code = %response.code(), "server accepted the message");
                Ok(())
            }
            Err(e) => Err(classify_smtp_error(&e)),
        }
    }
}

/// Split authentication rejections (permanent 53x responses) from
/// everything else, which stays retryable.
fn classify_smtp_error(e: &lettre::transport::smtp::Error) -> DeliveryError {
    let auth_rejected = e.status().is_some_and(|code| {
        code.severity == Severity::PermanentNegativeCompletion
            && code.category == Category::Unspecified3
    });

    if auth_rejected {
        DeliveryError::Auth(e.to_string())
    } else {
        DeliveryError::Send(e.to_string())
    }
}

/// Deliver the rendered digest with the configured retry policy.
///
/// The addressing precondition is checked before the first attempt, so an
/// incomplete configuration costs zero attempts.
#[instrument(level = "info", skip_all, fields(server = %config.smtp_server, port = config.smtp_port))]
pub async fn send_digest(
    config: &EmailConfig,
    subject: &str,
    html_body: &str,
) -> Result<(), DeliveryError> {
    if let Some(field) = config.missing_field() {
        error!(field, "email configuration incomplete; delivery aborted");
        return Err(DeliveryError::IncompleteConfig(field));
    }

    let mailer = SmtpMailer::new(config.clone(), subject.to_string(), html_body.to_string());
    RetrySend::new(mailer, MAX_ATTEMPTS, BACKOFF_UNIT).send().await
}
