//! Request/response DTOs for the ticketing HTTP API.

use serde::{Deserialize, Serialize};

use crate::domain::ticketing::CartLine;

/// Request body for `POST /api/payments/initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializePaymentRequest {
    /// Purchaser email.
    pub email: String,

    /// Purchaser display name.
    pub name: String,

    /// Amount in minor currency units.
    pub amount: i64,

    /// Cart selection.
    pub cart: Vec<CartLineDto>,
}

/// One cart line on the wire: `{"type": ..., "quantity": ..., "name": ...}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CartLineDto {
    #[serde(rename = "type")]
    pub ticket_type: String,

    pub quantity: u32,

    #[serde(rename = "name")]
    pub display_name: String,
}

impl From<CartLineDto> for CartLine {
    fn from(dto: CartLineDto) -> Self {
        CartLine {
            ticket_type: dto.ticket_type,
            quantity: dto.quantity,
            display_name: dto.display_name,
        }
    }
}

/// Response body for a successful initialization.
#[derive(Debug, Clone, Serialize)]
pub struct InitializePaymentResponse {
    /// URL the purchaser is redirected to for payment.
    pub authorization_url: String,

    /// Provider access code for the transaction.
    pub access_code: String,

    /// Provider transaction reference.
    pub reference: String,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: String,

    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_request_parses_wire_names() {
        let json = r#"{
            "email": "a@x.com",
            "name": "Jane Doe",
            "amount": 500000,
            "cart": [{"type": "regular", "quantity": 2, "name": "Regular Ticket"}]
        }"#;

        let request: InitializePaymentRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.cart[0].ticket_type, "regular");
        assert_eq!(request.cart[0].display_name, "Regular Ticket");
    }

    #[test]
    fn cart_line_dto_converts_to_domain() {
        let dto = CartLineDto {
            ticket_type: "vip".to_string(),
            quantity: 1,
            display_name: "VIP Ticket".to_string(),
        };

        let line: CartLine = dto.into();

        assert_eq!(line.ticket_type, "vip");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.display_name, "VIP Ticket");
    }

    #[test]
    fn error_response_serializes_code_and_message() {
        let response = ErrorResponse::new("INVALID_SIGNATURE", "Invalid signature");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["code"], "INVALID_SIGNATURE");
        assert_eq!(json["message"], "Invalid signature");
    }
}
