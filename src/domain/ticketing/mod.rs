//! Ticketing domain - payment events, purchases, units, and ticket identity.
//!
//! Everything in this module is pure: parsing and validating the provider
//! payload, verifying its signature, expanding carts into units, and
//! deriving ticket identifiers. Infrastructure lives behind ports.

mod payment_event;
mod purchase;
mod ticket_id;
mod unit;
mod webhook_errors;
mod webhook_verifier;

pub use payment_event::{CartLine, ChargeData, Customer, EventMetadata, PaymentEvent, PaymentEventType};
#[cfg(test)]
pub use payment_event::PaymentEventBuilder;
pub use purchase::Purchase;
pub use ticket_id::{TicketIdentifier, PROGRAM_TAG};
pub use unit::{expand_cart, TicketUnit};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::PaystackWebhookVerifier;
#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
