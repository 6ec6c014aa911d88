//! Paystack webhook signature verification.
//!
//! Implements verification of the `x-paystack-signature` header using
//! HMAC-SHA512 over the raw request body. Paystack signs the body bytes
//! directly with the account's secret key; there is no timestamp scheme.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

type HmacSha512 = Hmac<Sha512>;

/// Verifier for Paystack webhook signatures.
///
/// This is the sole authentication boundary: every inbound event is
/// presumed forged unless `verify` returns true.
pub struct PaystackWebhookVerifier {
    /// The Paystack secret key, which doubles as the webhook signing key.
    secret: String,
}

impl PaystackWebhookVerifier {
    /// Creates a new verifier with the given secret key.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature header against the raw request body.
    ///
    /// Must be called with the exact bytes as transmitted; parsing the
    /// body before verification invalidates the signature. Returns false
    /// on any mismatch, including non-hex header values. No side effects.
    pub fn verify(&self, payload: &[u8], provided_signature: &str) -> bool {
        let Ok(provided) = hex::decode(provided_signature) else {
            return false;
        };

        let expected = self.compute_signature(payload);
        constant_time_compare(&expected, &provided)
    }

    /// Computes the HMAC-SHA512 signature over the payload bytes.
    fn compute_signature(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha512::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// This prevents timing attacks that could leak information about the expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a hex-encoded HMAC-SHA512 for use in test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
