//! User repository trait (read-only)

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Read-only access to the externally owned user table
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Get a user by ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by unique login name
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DomainError>;

    /// Get several users at once, skipping ids with no row
    async fn get_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// Case-insensitive substring search on name or fullname
    async fn search(&self, query: &str) -> Result<Vec<User>, DomainError>;
}
