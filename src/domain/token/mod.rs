//! Invitation token port
//!
//! Tokens are ephemeral and never persisted: validity is entirely
//! determined by signature verification and expiry at consumption time.
//! A token stays valid for repeated use within its window; re-acceptance
//! is idempotent, so no single-use bookkeeping is kept.

use std::fmt::Debug;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Purpose salt for private-team invitations
pub const JOIN_PRIVATE_TEAM: &str = "join-private-team";

/// The payload carried by an invitation token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitePayload {
    /// Login name of the invited user
    pub user: String,
    /// Unique name of the team
    pub team: String,
}

impl InvitePayload {
    pub fn new(user: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            team: team.into(),
        }
    }
}

/// Signs and verifies time-limited invitation payloads
pub trait InviteTokenCodec: Send + Sync + Debug {
    /// Produce an opaque URL-safe token encoding the payload, tagged with
    /// a purpose salt and the issuance timestamp
    fn issue(&self, payload: &InvitePayload, purpose: &str) -> Result<String, DomainError>;

    /// Verify a token and return the original payload. Fails with
    /// `InvalidToken` on a bad signature, a purpose mismatch, or when the
    /// token is older than `max_age`.
    fn verify(
        &self,
        token: &str,
        purpose: &str,
        max_age: Duration,
    ) -> Result<InvitePayload, DomainError>;
}
