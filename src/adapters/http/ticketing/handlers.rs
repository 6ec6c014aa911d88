//! HTTP handlers for the ticketing endpoints.
//!
//! Connects axum routes to the application layer. The webhook handler
//! extracts the raw body bytes and signature header untouched; parsing
//! happens inside the fulfillment handler, after verification.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use secrecy::{ExposeSecret, SecretString};

use crate::application::artifacts::ArtifactGenerator;
use crate::application::handlers::ticketing::{
    FulfillPurchaseCommand, FulfillPurchaseHandler, InitializePaymentCommand,
    InitializePaymentHandler,
};
use crate::application::notifications::TicketNotifier;
use crate::domain::ticketing::{PaystackWebhookVerifier, WebhookError};
use crate::ports::{
    BaseImageStore, CodeRenderer, ImageComposer, MailTransport, PaymentError, PaymentGateway,
    PurchaseLedger,
};

use super::dto::{ErrorResponse, InitializePaymentRequest, InitializePaymentResponse};

/// Header carrying the provider's webhook signature.
const SIGNATURE_HEADER: &str = "x-paystack-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct TicketingAppState {
    /// Paystack secret key; used to verify webhook signatures.
    pub webhook_secret: SecretString,
    pub ledger: Arc<dyn PurchaseLedger>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub code_renderer: Arc<dyn CodeRenderer>,
    pub base_images: Arc<dyn BaseImageStore>,
    pub composer: Arc<dyn ImageComposer>,
    pub mail_transport: Arc<dyn MailTransport>,
}

impl TicketingAppState {
    /// Create the fulfillment handler on demand from the shared state.
    pub fn fulfill_handler(&self) -> FulfillPurchaseHandler {
        FulfillPurchaseHandler::new(
            PaystackWebhookVerifier::new(self.webhook_secret.expose_secret()),
            self.ledger.clone(),
            ArtifactGenerator::new(
                self.code_renderer.clone(),
                self.base_images.clone(),
                self.composer.clone(),
            ),
            TicketNotifier::new(self.mail_transport.clone()),
        )
    }

    /// Create the payment-initialization handler.
    pub fn initialize_handler(&self) -> InitializePaymentHandler {
        InitializePaymentHandler::new(self.gateway.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - liveness probe
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// POST /api/webhooks/paystack - handle provider webhooks
///
/// Responds 401 on signature failure, 400 on a malformed (but authentic)
/// payload, and 200 on every other outcome: ignored event types,
/// duplicate deliveries, and deliveries fulfilled with partial per-unit
/// failures are all acknowledged so the provider stops retrying.
pub async fn handle_paystack_webhook(
    State(state): State<TicketingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let handler = state.fulfill_handler();
    let cmd = FulfillPurchaseCommand {
        payload: body.to_vec(),
        signature,
    };

    handler.handle(cmd).await?;

    Ok(StatusCode::OK)
}

/// POST /api/payments/initialize - start a checkout with the provider
pub async fn initialize_payment(
    State(state): State<TicketingAppState>,
    Json(request): Json<InitializePaymentRequest>,
) -> Result<impl IntoResponse, PaymentApiError> {
    validate_initialize_request(&request)?;

    let handler = state.initialize_handler();
    let cmd = InitializePaymentCommand {
        email: request.email,
        full_name: request.name,
        amount: request.amount,
        cart: request.cart.into_iter().map(Into::into).collect(),
    };

    let result = handler.handle(cmd).await?;

    let response = InitializePaymentResponse {
        authorization_url: result.session.authorization_url,
        access_code: result.session.access_code,
        reference: result.session.reference,
    };

    Ok(Json(response))
}

fn validate_initialize_request(request: &InitializePaymentRequest) -> Result<(), PaymentApiError> {
    if !request.email.contains('@') {
        return Err(PaymentApiError::validation("email must be a valid address"));
    }
    if request.name.trim().is_empty() {
        return Err(PaymentApiError::validation("name must not be empty"));
    }
    if request.amount <= 0 {
        return Err(PaymentApiError::validation("amount must be positive"));
    }
    if request.cart.is_empty() {
        return Err(PaymentApiError::validation("cart must not be empty"));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook rejections to HTTP responses.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let code = match &self.0 {
            WebhookError::MissingSignature => "MISSING_SIGNATURE",
            WebhookError::InvalidSignature => "INVALID_SIGNATURE",
            WebhookError::MalformedEvent(_) => "MALFORMED_EVENT",
        };
        let body = ErrorResponse::new(code, self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}

/// API error type for the payment-initialization endpoint.
pub enum PaymentApiError {
    /// Request failed local validation.
    Validation(String),

    /// Provider call failed.
    Provider(PaymentError),
}

impl PaymentApiError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<PaymentError> for PaymentApiError {
    fn from(err: PaymentError) -> Self {
        Self::Provider(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            PaymentApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
            }
            PaymentApiError::Provider(err) => {
                tracing::error!(error = %err, "payment initialization failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PAYMENT_PROVIDER_ERROR",
                    err.to_string(),
                )
            }
        };
        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}
