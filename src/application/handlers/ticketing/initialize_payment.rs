//! InitializePaymentHandler - thin proxy to the provider's checkout API.

use std::sync::Arc;

use crate::domain::ticketing::CartLine;
use crate::ports::{
    AuthorizationSession, InitializeTransactionRequest, PaymentError, PaymentGateway,
};

/// Command to start a checkout with the payment provider.
#[derive(Debug, Clone)]
pub struct InitializePaymentCommand {
    /// Purchaser email.
    pub email: String,

    /// Purchaser display name.
    pub full_name: String,

    /// Amount in minor currency units.
    pub amount: i64,

    /// Cart selection; echoed back in the eventual webhook.
    pub cart: Vec<CartLine>,
}

/// Result of a successful initialization.
#[derive(Debug, Clone)]
pub struct InitializePaymentResult {
    /// The provider's authorization session.
    pub session: AuthorizationSession,
}

/// Handler forwarding checkout initialization to the provider.
pub struct InitializePaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl InitializePaymentHandler {
    /// Creates a handler over the given gateway.
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Initializes a transaction with the provider.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the provider call fails.
    pub async fn handle(
        &self,
        cmd: InitializePaymentCommand,
    ) -> Result<InitializePaymentResult, PaymentError> {
        let session = self
            .gateway
            .initialize_transaction(InitializeTransactionRequest {
                email: cmd.email,
                full_name: cmd.full_name,
                amount: cmd.amount,
                cart: cmd.cart,
            })
            .await?;

        tracing::info!(
            reference = %session.reference,
            "transaction initialized"
        );

        Ok(InitializePaymentResult { session })
    }
}
