//! Ports - interfaces between the application core and infrastructure.
//!
//! Each port is an `async_trait` (or pure-function) boundary with its own
//! error type. Adapters under `crate::adapters` provide the production
//! implementations; tests provide in-memory fakes.

mod artwork;
mod mail_transport;
mod payment_gateway;
mod purchase_ledger;

pub use artwork::{ArtifactError, BaseImageStore, CodeRenderer, ImageComposer};
pub use mail_transport::{MailError, MailTransport, TicketEmail};
pub use payment_gateway::{
    AuthorizationSession, InitializeTransactionRequest, PaymentError, PaymentGateway,
};
pub use purchase_ledger::{LedgerError, PurchaseLedger, RecordOutcome};
