//! Paystack API adapter (reqwest).

mod gateway;

pub use gateway::{PaystackConfig, PaystackGateway};
