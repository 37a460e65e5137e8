//! Webhook signature verification.
//!
//! LINE signs each webhook POST with base64(HMAC-SHA256(channel secret,
//! raw body)) and sends it in the `x-line-signature` header.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the signature for a raw body, as the platform would.
pub fn sign(channel_secret: &str, body: &[u8]) -> String {
    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .expect("HMAC key of any length is valid");
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Verify a signature header against the raw body. Returns false for a
/// malformed (non-base64) header; the comparison is constant-time.
pub fn verify(channel_secret: &str, signature: &str, body: &[u8]) -> bool {
    let Ok(decoded) = BASE64.decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&decoded).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-channel-secret";

    #[test]
    fn signed_body_verifies() {
        let body = br#"{"events":[]}"#;
        let sig = sign(SECRET, body);
        assert!(verify(SECRET, &sig, body));
    }

    #[test]
    fn wrong_secret_fails() {
        let body = br#"{"events":[]}"#;
        let sig = sign(SECRET, body);
        assert!(!verify("other-secret", &sig, body));
    }

    #[test]
    fn tampered_body_fails() {
        let sig = sign(SECRET, br#"{"events":[]}"#);
        assert!(!verify(SECRET, &sig, br#"{"events":[{}]}"#));
    }

    #[test]
    fn malformed_header_fails() {
        assert!(!verify(SECRET, "not base64 !!!", b"body"));
        assert!(!verify(SECRET, "", b"body"));
    }
}
