//! HMAC-SHA256 invitation token signer
//!
//! Token layout: `payload_b64.issued_at_b64.signature_b64` with URL-safe
//! base64 segments. The MAC covers the purpose salt plus both encoded
//! segments, so a token issued for one purpose never verifies for
//! another. Verification failures are collapsed into a single
//! `InvalidToken` error.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::token::{InvitePayload, InviteTokenCodec};
use crate::domain::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// Invitation signer keyed with a server-side secret
pub struct HmacInviteSigner {
    secret: String,
}

impl fmt::Debug for HmacInviteSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacInviteSigner")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl HmacInviteSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, purpose: &str, payload_b64: &str, issued_b64: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(purpose.as_bytes());
        mac.update(b".");
        mac.update(payload_b64.as_bytes());
        mac.update(b".");
        mac.update(issued_b64.as_bytes());
        mac
    }

    fn issue_at(
        &self,
        payload: &InvitePayload,
        purpose: &str,
        issued_at: i64,
    ) -> Result<String, DomainError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| DomainError::internal(format!("Failed to encode payload: {}", e)))?;

        let payload_b64 = URL_SAFE_NO_PAD.encode(body);
        let issued_b64 = URL_SAFE_NO_PAD.encode(issued_at.to_string());

        let tag = self.mac(purpose, &payload_b64, &issued_b64).finalize();
        let signature_b64 = URL_SAFE_NO_PAD.encode(tag.into_bytes());

        Ok(format!("{payload_b64}.{issued_b64}.{signature_b64}"))
    }
}

impl InviteTokenCodec for HmacInviteSigner {
    fn issue(&self, payload: &InvitePayload, purpose: &str) -> Result<String, DomainError> {
        self.issue_at(payload, purpose, Utc::now().timestamp())
    }

    fn verify(
        &self,
        token: &str,
        purpose: &str,
        max_age: Duration,
    ) -> Result<InvitePayload, DomainError> {
        let mut parts = token.split('.');

        let (payload_b64, issued_b64, signature_b64) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(p), Some(i), Some(s), None) => (p, i, s),
                _ => return Err(DomainError::invalid_token()),
            };

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| DomainError::invalid_token())?;

        // Constant-time comparison via the Mac verifier
        self.mac(purpose, payload_b64, issued_b64)
            .verify_slice(&signature)
            .map_err(|_| DomainError::invalid_token())?;

        let issued_raw = URL_SAFE_NO_PAD
            .decode(issued_b64)
            .map_err(|_| DomainError::invalid_token())?;
        let issued_at: i64 = std::str::from_utf8(&issued_raw)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(DomainError::invalid_token)?;

        let age = Utc::now().timestamp() - issued_at;

        if age > max_age.as_secs() as i64 {
            return Err(DomainError::invalid_token());
        }

        let payload_raw = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| DomainError::invalid_token())?;

        serde_json::from_slice(&payload_raw).map_err(|_| DomainError::invalid_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::JOIN_PRIVATE_TEAM;

    const HOUR: Duration = Duration::from_secs(3600);

    fn signer() -> HmacInviteSigner {
        HmacInviteSigner::new("test-secret")
    }

    fn payload() -> InvitePayload {
        InvitePayload::new("jane", "Data Cleaners")
    }

    #[test]
    fn test_roundtrip() {
        let signer = signer();
        let token = signer.issue(&payload(), JOIN_PRIVATE_TEAM).unwrap();

        let decoded = signer.verify(&token, JOIN_PRIVATE_TEAM, HOUR).unwrap();
        assert_eq!(decoded, payload());
    }

    #[test]
    fn test_token_is_url_safe() {
        let signer = signer();
        let token = signer
            .issue(&InvitePayload::new("jane", "team with spaces & +"), JOIN_PRIVATE_TEAM)
            .unwrap();

        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));
    }

    #[test]
    fn test_wrong_purpose_fails() {
        let signer = signer();
        let token = signer.issue(&payload(), JOIN_PRIVATE_TEAM).unwrap();

        let result = signer.verify(&token, "reset-password", HOUR);
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_fails() {
        let signer = signer();
        let issued_at = Utc::now().timestamp() - 7200;
        let token = signer
            .issue_at(&payload(), JOIN_PRIVATE_TEAM, issued_at)
            .unwrap();

        let result = signer.verify(&token, JOIN_PRIVATE_TEAM, HOUR);
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_token_within_window_verifies() {
        let signer = signer();
        let issued_at = Utc::now().timestamp() - 1800;
        let token = signer
            .issue_at(&payload(), JOIN_PRIVATE_TEAM, issued_at)
            .unwrap();

        assert!(signer.verify(&token, JOIN_PRIVATE_TEAM, HOUR).is_ok());
    }

    #[test]
    fn test_tampered_payload_fails() {
        let signer = signer();
        let token = signer.issue(&payload(), JOIN_PRIVATE_TEAM).unwrap();

        let forged_payload =
            URL_SAFE_NO_PAD.encode(r#"{"user":"mallory","team":"Data Cleaners"}"#);
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[0] = &forged_payload;
        let forged = parts.join(".");

        let result = signer.verify(&forged, JOIN_PRIVATE_TEAM, HOUR);
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_different_secret_fails() {
        let token = signer().issue(&payload(), JOIN_PRIVATE_TEAM).unwrap();

        let other = HmacInviteSigner::new("another-secret");
        let result = other.verify(&token, JOIN_PRIVATE_TEAM, HOUR);
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_fails() {
        let signer = signer();

        assert!(signer.verify("not-a-token", JOIN_PRIVATE_TEAM, HOUR).is_err());
        assert!(signer.verify("a.b.c", JOIN_PRIVATE_TEAM, HOUR).is_err());
        assert!(signer.verify("a.b.c.d", JOIN_PRIVATE_TEAM, HOUR).is_err());
        assert!(signer.verify("", JOIN_PRIVATE_TEAM, HOUR).is_err());
    }
}
