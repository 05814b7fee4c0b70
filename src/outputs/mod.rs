//! Digest outputs: the HTML email body and the local text backup.
//!
//! # Submodules
//!
//! - [`html`]: renders the self-contained digest document and its subject
//!   line (pure functions, no I/O)
//! - [`backup`]: writes the timestamp-named plain-text backup file
//!
//! The email is the primary output; the backup is written regardless of
//! whether delivery succeeded, so collected items are never lost to an
//! SMTP failure.

pub mod backup;
pub mod html;
