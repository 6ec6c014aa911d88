//! Ticketing command handlers.

mod fulfill_purchase;
mod initialize_payment;

pub use fulfill_purchase::{
    FulfillPurchaseCommand, FulfillPurchaseHandler, FulfillmentOutcome, FulfillmentReport,
    UnitOutcome, UnitStatus,
};
pub use initialize_payment::{
    InitializePaymentCommand, InitializePaymentHandler, InitializePaymentResult,
};
