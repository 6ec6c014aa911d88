//! SMTP implementation of the MailTransport port using Lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::ports::{MailError, MailTransport, TicketEmail};

/// SMTP mail transport.
///
/// Builds one multipart message per ticket (HTML body + PNG attachment)
/// and relays it over SMTP. A fresh transport is created per send to
/// avoid connection pooling issues, and the blocking send runs on the
/// blocking thread pool so a stalled relay cannot wedge the runtime.
#[derive(Clone)]
pub struct SmtpMailer {
    /// SMTP server address.
    smtp_host: String,

    /// SMTP server port.
    smtp_port: u16,

    /// SMTP credentials.
    credentials: Credentials,

    /// "Name <address>" header value for the sender.
    from_header: String,
}

impl SmtpMailer {
    /// Create a new SMTP mailer.
    pub fn new(
        smtp_host: String,
        smtp_port: u16,
        smtp_username: String,
        smtp_password: String,
        from_header: String,
    ) -> Self {
        Self {
            smtp_host,
            smtp_port,
            credentials: Credentials::new(smtp_username, smtp_password),
            from_header,
        }
    }

    /// Build SMTP transport for sending emails.
    ///
    /// # Errors
    ///
    /// Returns error if the relay address is invalid.
    fn build_transport(&self) -> Result<SmtpTransport, MailError> {
        Ok(SmtpTransport::relay(&self.smtp_host)
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {e}")))?
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build())
    }

    /// Assemble the multipart message for one ticket email.
    fn build_message(&self, email: TicketEmail) -> Result<Message, MailError> {
        let from: Mailbox = self
            .from_header
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("from address: {e}")))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("to address: {e}")))?;
        let png = ContentType::parse("image/png").map_err(|e| MailError::Build(e.to_string()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(email.html_body))
                    .singlepart(Attachment::new(email.attachment_name).body(email.attachment, png)),
            )
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: TicketEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&message)
                .map_err(|e| MailError::Transport(e.to_string()))
        })
        .await
        .map_err(|e| MailError::Transport(format!("send task failed: {e}")))?
        .map(|_| ())
    }
}
