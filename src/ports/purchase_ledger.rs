//! PurchaseLedger port - at-most-once persistence of purchases.
//!
//! The ledger is the idempotence boundary for webhook delivery. The
//! provider redelivers events until acknowledged, and concurrent
//! deliveries of the same reference may race; the unique constraint on
//! the payment reference is the sole synchronization primitive. Exactly
//! one delivery observes `Recorded`, every other observes
//! `DuplicateReference` and must perform no fulfillment.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ticketing::Purchase;

/// Errors from the persistence engine.
///
/// A duplicate reference is NOT an error; it is the expected redelivery
/// outcome and is reported through [`RecordOutcome`].
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Database operation failed (connectivity, constraint other than
    /// the reference key, timeout).
    #[error("Database error: {0}")]
    Database(String),

    /// The purchase could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result of attempting to record a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The purchase was inserted (first delivery of this reference).
    Recorded,
    /// A purchase with this reference already exists (redelivery).
    DuplicateReference,
}

/// Port for recording accepted purchases.
///
/// Implementations must enforce uniqueness on the payment reference at
/// the storage level (unique index + `ON CONFLICT DO NOTHING` or
/// equivalent) so that concurrent inserts cannot both succeed.
#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// Attempt to insert a new purchase keyed on its payment reference.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` for persistence failures. Duplicate
    /// references are a successful `DuplicateReference` outcome.
    async fn record_purchase(&self, purchase: &Purchase) -> Result<RecordOutcome, LedgerError>;
}
