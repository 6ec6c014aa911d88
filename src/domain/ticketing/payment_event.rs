//! Paystack webhook event types.
//!
//! Defines the structures for parsing webhook payloads at the trust
//! boundary, immediately after signature verification. Only fields
//! relevant to fulfillment are captured; unknown fields are ignored
//! for forward compatibility.

use serde::{Deserialize, Serialize};

use super::webhook_errors::WebhookError;

/// Paystack webhook event (simplified).
///
/// Wire shape:
///
/// ```json
/// {"event":"charge.success",
///  "data":{"reference":"abc123","amount":500000,
///          "customer":{"email":"a@x.com"},
///          "metadata":{"full_name":"Jane Doe",
///                      "cart":[{"type":"regular","quantity":2,"name":"Regular Ticket"}]}}}
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentEvent {
    /// Type of event (e.g. "charge.success").
    #[serde(rename = "event")]
    pub event_type: String,

    /// Transaction data carried by the event.
    pub data: ChargeData,
}

/// Transaction details of a charge event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChargeData {
    /// Provider's unique transaction reference.
    pub reference: String,

    /// Amount in minor currency units (kobo).
    pub amount: i64,

    /// The paying customer.
    pub customer: Customer,

    /// Metadata echoed back from payment initialization.
    pub metadata: EventMetadata,
}

/// Customer details as reported by the provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Customer {
    /// Purchaser email address; every ticket for this event goes here.
    pub email: String,
}

/// Metadata attached at initialization time and echoed back verbatim.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventMetadata {
    /// Purchaser display name.
    pub full_name: String,

    /// The cart as selected at checkout.
    #[serde(default)]
    pub cart: Vec<CartLine>,
}

/// One cart line: a ticket type and how many of it were bought.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CartLine {
    /// Machine name of the ticket type; selects the base image.
    #[serde(rename = "type")]
    pub ticket_type: String,

    /// Number of individual tickets in this line.
    pub quantity: u32,

    /// Human-readable ticket name, used in email subjects.
    #[serde(rename = "name")]
    pub display_name: String,
}

impl PaymentEvent {
    /// Parses an event from the raw (already verified) request body.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedEvent` if the payload does not
    /// match the expected shape.
    pub fn from_slice(payload: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(payload).map_err(|e| WebhookError::MalformedEvent(e.to_string()))
    }

    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> PaymentEventType {
        PaymentEventType::from_str(&self.event_type)
    }

    /// Returns true for the successful-charge event, the only one that
    /// triggers fulfillment.
    pub fn is_charge_success(&self) -> bool {
        self.parsed_type() == PaymentEventType::ChargeSuccess
    }
}

/// Known Paystack event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEventType {
    /// A charge completed successfully.
    ChargeSuccess,
    /// Unknown or unhandled event type.
    Unknown,
}

impl PaymentEventType {
    /// Parse event type from string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "charge.success" => Self::ChargeSuccess,
            _ => Self::Unknown,
        }
    }

    /// Convert to the provider's event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChargeSuccess => "charge.success",
            Self::Unknown => "unknown",
        }
    }
}

/// Builder for creating test PaymentEvent instances.
#[cfg(test)]
pub struct PaymentEventBuilder {
    event_type: String,
    reference: String,
    amount: i64,
    email: String,
    full_name: String,
    cart: Vec<CartLine>,
}

#[cfg(test)]
impl Default for PaymentEventBuilder {
    fn default() -> Self {
        Self {
            event_type: "charge.success".to_string(),
            reference: "ref_test_123".to_string(),
            amount: 500000,
            email: "buyer@example.com".to_string(),
            full_name: "Test Buyer".to_string(),
            cart: vec![CartLine {
                ticket_type: "regular".to_string(),
                quantity: 1,
                display_name: "Regular Ticket".to_string(),
            }],
        }
    }
}

#[cfg(test)]
impl PaymentEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn cart(mut self, cart: Vec<CartLine>) -> Self {
        self.cart = cart;
        self
    }

    pub fn build(self) -> PaymentEvent {
        PaymentEvent {
            event_type: self.event_type,
            data: ChargeData {
                reference: self.reference,
                amount: self.amount,
                customer: Customer { email: self.email },
                metadata: EventMetadata {
                    full_name: self.full_name,
                    cart: self.cart,
                },
            },
        }
    }
}
