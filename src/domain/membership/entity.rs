//! Membership edge between a user and a team
//!
//! A pure association entity: existence of a row means "is a member",
//! absence means "is not". At most one row exists per (user, team) pair;
//! the storage layer enforces a uniqueness constraint so that concurrent
//! joins surface as a duplicate-membership error instead of a second row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// The (user, team) membership edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    user_id: UserId,
    team_id: TeamId,
    created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(user_id: UserId, team_id: TeamId) -> Self {
        Self {
            user_id,
            team_id,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a membership from stored fields
    pub fn from_parts(user_id: UserId, team_id: TeamId, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            team_id,
            created_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_pair() {
        let user_id = UserId::generate();
        let team_id = TeamId::generate();
        let membership = Membership::new(user_id, team_id);

        assert_eq!(membership.user_id(), user_id);
        assert_eq!(membership.team_id(), team_id);
    }
}
