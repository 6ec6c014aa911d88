//! Ticket identifier generation.

use rand::RngCore;
use std::fmt;

/// Program tag prefixed to every ticket identifier.
pub const PROGRAM_TAG: &str = "ULES";

/// Length of the random suffix in bytes (hex-encodes to 8 characters).
const SUFFIX_BYTES: usize = 4;

/// Unique identifier embedded in a ticket's code image and email.
///
/// Format: `ULES-{TICKET_TYPE}-{XXXXXXXX}` where the suffix is 8
/// uppercase hex characters from random bytes. Identifiers are not
/// persisted or checked against prior issues; 32 bits of entropy per
/// type keeps collisions negligible at event scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketIdentifier(String);

impl TicketIdentifier {
    /// Generates a fresh identifier for the given ticket type.
    pub fn generate(ticket_type: &str) -> Self {
        let mut suffix = [0u8; SUFFIX_BYTES];
        rand::thread_rng().fill_bytes(&mut suffix);

        Self(format!(
            "{PROGRAM_TAG}-{}-{}",
            ticket_type.to_uppercase(),
            hex::encode_upper(suffix)
        ))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename under which the ticket image is attached to the email.
    pub fn attachment_filename(&self) -> String {
        format!("{}.png", self.0)
    }
}

impl fmt::Display for TicketIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
