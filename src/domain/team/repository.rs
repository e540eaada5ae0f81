//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Query parameters for listing teams
#[derive(Debug, Clone, Default)]
pub struct TeamQuery {
    /// Filter by visibility: Some(true) = public only, Some(false) = private only
    pub public: Option<bool>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl TeamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Repository for managing teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Get a team by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError>;

    /// Create a new team; fails with a validation error when the name is taken
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Update an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by ID
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;

    /// List teams matching the query, ordered by creation time
    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError>;

    /// Count teams matching the query
    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError>;

    /// Case-insensitive substring search on team name
    async fn search(&self, query: &str) -> Result<Vec<Team>, DomainError>;

    /// Get several teams at once, skipping ids with no row
    async fn get_many(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError>;
}
