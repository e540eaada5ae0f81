//! In-memory team repository
//!
//! Used by tests and as the database-less runtime backend.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::team::{Team, TeamId, TeamQuery, TeamRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<HashMap<TeamId, Team>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(team: &Team, query: &TeamQuery) -> bool {
        match query.public {
            Some(public) => team.is_public() == public,
            None => true,
        }
    }

    fn sorted_by_creation(mut teams: Vec<Team>) -> Vec<Team> {
        teams.sort_by_key(|t| t.created_at());
        teams
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let teams = self.teams.read().unwrap();
        Ok(teams.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        let teams = self.teams.read().unwrap();
        Ok(teams.values().find(|t| t.name() == name).cloned())
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().unwrap();

        if teams.values().any(|t| t.name() == team.name()) {
            return Err(DomainError::validation(format!(
                "The team name '{}' is already taken",
                team.name()
            )));
        }

        teams.insert(team.id(), team.clone());
        Ok(team)
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().unwrap();

        if !teams.contains_key(&team.id()) {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.name()
            )));
        }

        if teams
            .values()
            .any(|t| t.id() != team.id() && t.name() == team.name())
        {
            return Err(DomainError::validation(format!(
                "The team name '{}' is already taken",
                team.name()
            )));
        }

        teams.insert(team.id(), team.clone());
        Ok(team)
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let mut teams = self.teams.write().unwrap();
        Ok(teams.remove(&id).is_some())
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.read().unwrap();

        let filtered: Vec<Team> = teams
            .values()
            .filter(|t| Self::matches(t, query))
            .cloned()
            .collect();

        let mut sorted = Self::sorted_by_creation(filtered);

        if let Some(offset) = query.offset {
            sorted = sorted.into_iter().skip(offset).collect();
        }

        if let Some(limit) = query.limit {
            sorted.truncate(limit);
        }

        Ok(sorted)
    }

    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
        let teams = self.teams.read().unwrap();
        Ok(teams.values().filter(|t| Self::matches(t, query)).count())
    }

    async fn search(&self, query: &str) -> Result<Vec<Team>, DomainError> {
        let needle = query.to_lowercase();
        let teams = self.teams.read().unwrap();

        let found: Vec<Team> = teams
            .values()
            .filter(|t| t.name().to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(Self::sorted_by_creation(found))
    }

    async fn get_many(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.read().unwrap();

        let found: Vec<Team> = ids.iter().filter_map(|id| teams.get(id).cloned()).collect();

        Ok(Self::sorted_by_creation(found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    fn team(name: &str, public: bool) -> Team {
        Team::new(name, "Some description", public, UserId::generate()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_name() {
        let repo = InMemoryTeamRepository::new();
        let created = repo.create(team("Data Cleaners", true)).await.unwrap();

        let found = repo.find_by_name("Data Cleaners").await.unwrap().unwrap();
        assert_eq!(found.id(), created.id());
        assert!(repo.find_by_name("Unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_name_rejected() {
        let repo = InMemoryTeamRepository::new();
        repo.create(team("Data Cleaners", true)).await.unwrap();

        let result = repo.create(team("Data Cleaners", false)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(repo.count(&TeamQuery::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_taken_name() {
        let repo = InMemoryTeamRepository::new();
        repo.create(team("First team", true)).await.unwrap();
        let mut second = repo.create(team("Second team", true)).await.unwrap();

        second.set_name("First team").unwrap();
        let result = repo.update(second).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_public_filter() {
        let repo = InMemoryTeamRepository::new();
        repo.create(team("Public team", true)).await.unwrap();
        repo.create(team("Private team", false)).await.unwrap();

        let public = repo
            .list(&TeamQuery::new().with_public(true))
            .await
            .unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].name(), "Public team");

        assert_eq!(repo.count(&TeamQuery::new()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let repo = InMemoryTeamRepository::new();

        for i in 0..5 {
            repo.create(team(&format!("Team number {}", i), true))
                .await
                .unwrap();
        }

        let page = repo
            .list(&TeamQuery::new().with_offset(2).with_limit(2))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name(), "Team number 2");
    }

    #[tokio::test]
    async fn test_search_case_insensitive() {
        let repo = InMemoryTeamRepository::new();
        repo.create(team("Data Cleaners", true)).await.unwrap();
        repo.create(team("Bird Watchers", true)).await.unwrap();

        let found = repo.search("cLEAN").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Data Cleaners");

        assert!(repo.search("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryTeamRepository::new();
        let created = repo.create(team("Data Cleaners", true)).await.unwrap();

        assert!(repo.delete(created.id()).await.unwrap());
        assert!(!repo.delete(created.id()).await.unwrap());
        assert!(repo.get(created.id()).await.unwrap().is_none());
    }
}
