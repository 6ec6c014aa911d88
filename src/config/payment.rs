//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Paystack)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Paystack secret key. Also the webhook signing key: Paystack signs
    /// webhook bodies with HMAC-SHA512 using this same secret.
    pub paystack_secret_key: SecretString,

    /// Base URL for the Paystack API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl PaymentConfig {
    /// Check if using Paystack test mode
    pub fn is_test_mode(&self) -> bool {
        self.paystack_secret_key
            .expose_secret()
            .starts_with("sk_test_")
    }

    /// Check if using Paystack live mode
    pub fn is_live_mode(&self) -> bool {
        self.paystack_secret_key
            .expose_secret()
            .starts_with("sk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.paystack_secret_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYSTACK_SECRET_KEY"));
        }
        if !key.starts_with("sk_") {
            return Err(ValidationError::InvalidPaystackKey);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            paystack_secret_key: SecretString::new(String::new()),
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.paystack.co".to_string()
}
