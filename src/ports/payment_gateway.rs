//! PaymentGateway port - transaction initialization with the provider.
//!
//! The initialization call is a thin proxy: the purchaser's name and cart
//! travel as opaque metadata and come back verbatim in the webhook event.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ticketing::CartLine;

/// Errors from the payment provider API.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider returned a non-success status.
    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never completed (DNS, TLS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The provider responded with an unexpected body.
    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// Request to start a checkout with the provider.
#[derive(Debug, Clone)]
pub struct InitializeTransactionRequest {
    /// Purchaser email.
    pub email: String,

    /// Purchaser display name (echoed back via metadata).
    pub full_name: String,

    /// Amount in minor currency units.
    pub amount: i64,

    /// Cart selection (echoed back via metadata).
    pub cart: Vec<CartLine>,
}

/// The provider's authorization response.
#[derive(Debug, Clone)]
pub struct AuthorizationSession {
    /// URL the purchaser is redirected to for payment.
    pub authorization_url: String,

    /// Provider access code for the transaction.
    pub access_code: String,

    /// Provider transaction reference (will appear in the webhook).
    pub reference: String,
}

/// Port for the payment provider API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initialize a transaction and obtain the authorization URL.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` on API, network, or response-shape failure.
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<AuthorizationSession, PaymentError>;
}
