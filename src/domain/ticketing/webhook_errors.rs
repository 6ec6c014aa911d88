//! Webhook error types for payment webhook handling.
//!
//! Covers the rejection paths of the webhook endpoint. Everything past
//! the authentication and parse gates is acknowledged with 200 and never
//! surfaces here; per-unit fulfillment failures are collected into the
//! fulfillment report instead.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that reject a webhook delivery before fulfillment starts.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signature header was absent from the request.
    #[error("Missing signature header")]
    MissingSignature,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Payload passed verification but does not match the expected shape.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),
}

impl WebhookError {
    /// Maps the error to an appropriate HTTP status code.
    ///
    /// The provider retries on 5xx; none of these conditions can be
    /// cured by redelivery, so all map to 4xx.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Auth failures - presumed forged
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }

            // Authentic but unparseable - don't retry
            WebhookError::MalformedEvent(_) => StatusCode::BAD_REQUEST,
        }
    }
}
