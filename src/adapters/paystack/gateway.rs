//! Paystack payment gateway adapter.
//!
//! Implements the `PaymentGateway` port over the Paystack REST API.
//! The purchaser's name and cart are sent as transaction metadata and
//! echoed back verbatim in the webhook event, which is how fulfillment
//! later learns what was bought.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::ticketing::CartLine;
use crate::ports::{
    AuthorizationSession, InitializeTransactionRequest, PaymentError, PaymentGateway,
};

/// Paystack API configuration.
#[derive(Clone)]
pub struct PaystackConfig {
    /// Paystack secret key (sk_live_... or sk_test_...).
    secret_key: SecretString,

    /// Base URL for the Paystack API (default: https://api.paystack.co).
    api_base_url: String,
}

impl PaystackConfig {
    /// Create a new Paystack configuration.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_base_url: "https://api.paystack.co".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Paystack payment gateway adapter.
pub struct PaystackGateway {
    config: PaystackConfig,
    http_client: reqwest::Client,
}

impl PaystackGateway {
    /// Create a new gateway with the given configuration.
    pub fn new(config: PaystackConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Request body for `POST /transaction/initialize`.
#[derive(Debug, Serialize)]
struct InitializeBody<'a> {
    email: &'a str,
    amount: i64,
    metadata: InitializeMetadata<'a>,
}

/// Metadata echoed back in the eventual webhook event.
#[derive(Debug, Serialize)]
struct InitializeMetadata<'a> {
    full_name: &'a str,
    cart: &'a [CartLine],
}

/// Paystack response envelope.
#[derive(Debug, Deserialize)]
struct PaystackEnvelope<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

/// Payload of a successful initialization.
#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: String,
    reference: String,
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<AuthorizationSession, PaymentError> {
        let url = format!("{}/transaction/initialize", self.config.api_base_url);
        let body = InitializeBody {
            email: &request.email,
            amount: request.amount,
            metadata: InitializeMetadata {
                full_name: &request.full_name,
                cart: &request.cart,
            },
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let envelope: PaystackEnvelope<InitializeData> = response
            .json()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

        if !status.is_success() || !envelope.status {
            tracing::warn!(
                status = status.as_u16(),
                message = %envelope.message,
                "transaction initialization rejected"
            );
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| PaymentError::InvalidResponse("missing data field".to_string()))?;

        Ok(AuthorizationSession {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        })
    }
}
