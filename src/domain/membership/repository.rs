//! Membership repository trait

use async_trait::async_trait;

use super::entity::Membership;
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository for the (user, team) association table
#[async_trait]
pub trait MembershipRepository: Send + Sync + std::fmt::Debug {
    /// Check whether a membership row exists for the pair
    async fn exists(&self, user_id: UserId, team_id: TeamId) -> Result<bool, DomainError>;

    /// Insert a membership row; fails with `DuplicateMembership` when the
    /// pair already exists
    async fn add(&self, membership: Membership) -> Result<Membership, DomainError>;

    /// Delete the membership row for the pair; fails with `NotFound` when
    /// no such row exists
    async fn remove(&self, user_id: UserId, team_id: TeamId) -> Result<(), DomainError>;

    /// All membership rows of a team, ordered by creation time
    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Membership>, DomainError>;

    /// All membership rows of a user, ordered by creation time
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Membership>, DomainError>;

    /// Number of members of a team
    async fn count_by_team(&self, team_id: TeamId) -> Result<i64, DomainError>;

    /// Delete all membership rows of a team, returning how many were removed.
    /// Used by team deletion so no dangling edges survive the team.
    async fn remove_by_team(&self, team_id: TeamId) -> Result<u64, DomainError>;
}
