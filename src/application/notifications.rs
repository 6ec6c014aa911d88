//! TicketNotifier - builds and dispatches one email per ticket unit.

use std::sync::Arc;

use crate::application::artifacts::TicketArtifact;
use crate::domain::ticketing::TicketUnit;
use crate::ports::{MailError, MailTransport, TicketEmail};

/// Sends ticket emails through the configured mail transport.
///
/// Builds a single-recipient message per unit: fixed subject template,
/// HTML body with the purchaser's name and the ticket identifier, and
/// the artifact image attached under the identifier's filename.
pub struct TicketNotifier {
    transport: Arc<dyn MailTransport>,
}

impl TicketNotifier {
    /// Creates a notifier over the given transport.
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Sends the ticket for one unit to the purchaser.
    ///
    /// # Errors
    ///
    /// Returns `MailError` if the message cannot be built or the
    /// transport rejects it. Callers treat this as that unit's failure
    /// only.
    pub async fn send_ticket(
        &self,
        to: &str,
        purchaser_name: &str,
        unit: &TicketUnit,
        artifact: &TicketArtifact,
    ) -> Result<(), MailError> {
        let email = TicketEmail {
            to: to.to_string(),
            subject: format!("Your {} is here!", unit.display_name),
            html_body: ticket_body(purchaser_name, &unit.display_name, artifact.identifier.as_str()),
            attachment_name: artifact.identifier.attachment_filename(),
            attachment: artifact.image.clone(),
        };

        self.transport.send(email).await
    }
}

/// HTML body for a ticket email.
fn ticket_body(purchaser_name: &str, display_name: &str, identifier: &str) -> String {
    format!(
        r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Your ticket</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #1d4ed8;">Hi {purchaser_name},</h2>
        <p>Thank you for your purchase! Your <strong>{display_name}</strong> is attached to this email.</p>
        <p>Ticket code: <strong>{identifier}</strong></p>
        <p>Present the attached image at the entrance. The code on it will be scanned for admission.</p>
        <p style="color: #666; font-size: 14px;">
            Keep this email safe; anyone with the code can use the ticket.
        </p>
    </div>
</body>
</html>
        "#
    )
}
