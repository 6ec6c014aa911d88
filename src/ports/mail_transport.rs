//! MailTransport port - outbound ticket email dispatch.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the mail transport.
#[derive(Debug, Error)]
pub enum MailError {
    /// A sender or recipient address could not be parsed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The message could not be assembled.
    #[error("Failed to build email: {0}")]
    Build(String),

    /// The transport rejected the message or the connection failed.
    #[error("Failed to send email: {0}")]
    Transport(String),
}

/// A fully assembled single-recipient ticket email.
#[derive(Debug, Clone)]
pub struct TicketEmail {
    /// Recipient address.
    pub to: String,

    /// Subject line.
    pub subject: String,

    /// HTML body.
    pub html_body: String,

    /// Attachment filename (e.g. `ULES-REGULAR-1A2B3C4D.png`).
    pub attachment_name: String,

    /// PNG attachment bytes.
    pub attachment: Vec<u8>,
}

/// Port for dispatching ticket emails.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one email with its ticket image attached.
    ///
    /// # Errors
    ///
    /// Returns `MailError` on address, build, or transport failure.
    async fn send(&self, email: TicketEmail) -> Result<(), MailError>;
}
