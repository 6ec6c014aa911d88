//! The persisted purchase record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payment_event::{CartLine, PaymentEvent};

/// A purchase accepted from a verified payment event.
///
/// Created once per payment reference by the fulfillment orchestrator,
/// never mutated, never deleted. The ledger's unique constraint on
/// `paystack_reference` is what makes webhook redelivery harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Internal record id.
    pub id: Uuid,

    /// Purchaser display name.
    pub buyer_name: String,

    /// Purchaser email; destination for every ticket in the purchase.
    pub buyer_email: String,

    /// The cart as purchased, line order preserved.
    pub inventory: Vec<CartLine>,

    /// Total charged amount in minor currency units.
    pub total_amount: i64,

    /// Provider's unique transaction reference (ledger uniqueness key).
    pub paystack_reference: String,

    /// When this record was created.
    pub purchase_date: DateTime<Utc>,
}

impl Purchase {
    /// Builds a purchase from a verified charge event, stamping the
    /// purchase date with the current time.
    pub fn from_event(event: &PaymentEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            buyer_name: event.data.metadata.full_name.clone(),
            buyer_email: event.data.customer.email.clone(),
            inventory: event.data.metadata.cart.clone(),
            total_amount: event.data.amount,
            paystack_reference: event.data.reference.clone(),
            purchase_date: Utc::now(),
        }
    }
}
