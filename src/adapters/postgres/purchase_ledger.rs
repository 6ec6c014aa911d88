//! PostgreSQL implementation of the PurchaseLedger port.
//!
//! The `purchases` table carries a unique index on `paystack_reference`;
//! inserts use `ON CONFLICT DO NOTHING` so concurrent deliveries of the
//! same reference resolve at the database without an explicit lock.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::ticketing::Purchase;
use crate::ports::{LedgerError, PurchaseLedger, RecordOutcome};

/// PostgreSQL implementation of the PurchaseLedger port.
pub struct PostgresPurchaseLedger {
    pool: PgPool,
}

impl PostgresPurchaseLedger {
    /// Creates a ledger over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseLedger for PostgresPurchaseLedger {
    async fn record_purchase(&self, purchase: &Purchase) -> Result<RecordOutcome, LedgerError> {
        let inventory = serde_json::to_value(&purchase.inventory)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO purchases (
                id, buyer_name, buyer_email, inventory, total_amount,
                paystack_reference, purchase_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (paystack_reference) DO NOTHING
            "#,
        )
        .bind(purchase.id)
        .bind(&purchase.buyer_name)
        .bind(&purchase.buyer_email)
        .bind(inventory)
        .bind(purchase.total_amount)
        .bind(&purchase.paystack_reference)
        .bind(purchase.purchase_date)
        .execute(&self.pool)
        .await
        .map_err(|e| LedgerError::Database(format!("Failed to record purchase: {}", e)))?;

        if result.rows_affected() == 0 {
            // The conflict target swallowed the insert: this reference
            // was already recorded by an earlier (or concurrent) delivery.
            Ok(RecordOutcome::DuplicateReference)
        } else {
            Ok(RecordOutcome::Recorded)
        }
    }
}
