//! PostgreSQL adapters (sqlx).

mod purchase_ledger;

pub use purchase_ledger::PostgresPurchaseLedger;
