//! In-memory membership repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::membership::{Membership, MembershipRepository};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryMembershipRepository {
    rows: RwLock<HashMap<(UserId, TeamId), Membership>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_by_creation(mut rows: Vec<Membership>) -> Vec<Membership> {
        rows.sort_by_key(|m| m.created_at());
        rows
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn exists(&self, user_id: UserId, team_id: TeamId) -> Result<bool, DomainError> {
        let rows = self.rows.read().unwrap();
        Ok(rows.contains_key(&(user_id, team_id)))
    }

    async fn add(&self, membership: Membership) -> Result<Membership, DomainError> {
        let mut rows = self.rows.write().unwrap();
        let key = (membership.user_id(), membership.team_id());

        if rows.contains_key(&key) {
            return Err(DomainError::duplicate_membership(
                "This user is already in this team",
            ));
        }

        rows.insert(key, membership.clone());
        Ok(membership)
    }

    async fn remove(&self, user_id: UserId, team_id: TeamId) -> Result<(), DomainError> {
        let mut rows = self.rows.write().unwrap();

        if rows.remove(&(user_id, team_id)).is_none() {
            return Err(DomainError::not_found("No such membership"));
        }

        Ok(())
    }

    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<Membership>, DomainError> {
        let rows = self.rows.read().unwrap();

        let found: Vec<Membership> = rows
            .values()
            .filter(|m| m.team_id() == team_id)
            .cloned()
            .collect();

        Ok(Self::sorted_by_creation(found))
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Membership>, DomainError> {
        let rows = self.rows.read().unwrap();

        let found: Vec<Membership> = rows
            .values()
            .filter(|m| m.user_id() == user_id)
            .cloned()
            .collect();

        Ok(Self::sorted_by_creation(found))
    }

    async fn count_by_team(&self, team_id: TeamId) -> Result<i64, DomainError> {
        let rows = self.rows.read().unwrap();
        Ok(rows.values().filter(|m| m.team_id() == team_id).count() as i64)
    }

    async fn remove_by_team(&self, team_id: TeamId) -> Result<u64, DomainError> {
        let mut rows = self.rows.write().unwrap();

        let keys: Vec<(UserId, TeamId)> = rows
            .keys()
            .filter(|(_, tid)| *tid == team_id)
            .cloned()
            .collect();

        let count = keys.len() as u64;

        for key in keys {
            rows.remove(&key);
        }

        Ok(count)
    }
}
