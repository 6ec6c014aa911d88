//! HTTP adapters (axum).

pub mod ticketing;
