//! HTTP adapter for the ticketing API.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::TicketingAppState;
pub use routes::{api_router, payment_routes, webhook_routes};
