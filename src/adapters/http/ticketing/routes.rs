//! Axum router configuration for the ticketing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    handle_paystack_webhook, health, initialize_payment, TicketingAppState,
};

/// Create the payment API router.
///
/// # Routes
/// - `POST /initialize` - Start a checkout with the payment provider
pub fn payment_routes() -> Router<TicketingAppState> {
    Router::new().route("/initialize", post(initialize_payment))
}

/// Create the webhook router.
///
/// Separate from the payment routes because webhooks carry no user
/// context; they are authenticated by signature alone.
///
/// # Routes
/// - `POST /paystack` - Handle provider webhooks
pub fn webhook_routes() -> Router<TicketingAppState> {
    Router::new().route("/paystack", post(handle_paystack_webhook))
}

/// Create the complete application router.
///
/// Mounts the API under `/api` and exposes the liveness probe at `/health`.
///
/// # Example
///
/// ```ignore
/// use ules_tickets::adapters::http::ticketing::{api_router, TicketingAppState};
///
/// let app_state = TicketingAppState { /* ... */ };
/// let app = api_router().with_state(app_state);
/// ```
pub fn api_router() -> Router<TicketingAppState> {
    Router::new()
        .nest("/api/payments", payment_routes())
        .nest("/api/webhooks", webhook_routes())
        .route("/health", get(health))
}
