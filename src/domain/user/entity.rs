//! User entity
//!
//! Users are owned by an external user-management subsystem; this service
//! only reads them. The `score` field is maintained by an external
//! statistics subsystem and feeds team rank aggregates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identifier (UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of a platform user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    /// Unique login name, used for lookups and invitation payloads
    name: String,
    fullname: String,
    email_addr: String,
    /// Platform admin flag; grants elevated rights over all teams
    admin: bool,
    /// Contribution score from the external statistics subsystem
    score: i64,
}

impl User {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        fullname: impl Into<String>,
        email_addr: impl Into<String>,
        admin: bool,
        score: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            fullname: fullname.into(),
            email_addr: email_addr.into(),
            admin,
            score,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fullname(&self) -> &str {
        &self.fullname
    }

    pub fn email_addr(&self) -> &str {
        &self.email_addr
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}
