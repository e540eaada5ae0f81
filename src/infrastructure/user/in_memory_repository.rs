//! In-memory user repository
//!
//! Users are externally owned; this backend exists for tests and the
//! database-less runtime, which is why it grows an `insert` next to the
//! read-only trait.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user. Not part of `UserRepository`: the user table is
    /// read-only from this service's perspective.
    pub fn insert(&self, user: User) {
        self.users.write().unwrap().insert(user.id(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.name() == name).cloned())
    }

    async fn get_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<User>, DomainError> {
        let needle = query.to_lowercase();
        let users = self.users.read().unwrap();

        let mut found: Vec<User> = users
            .values()
            .filter(|u| {
                u.name().to_lowercase().contains(&needle)
                    || u.fullname().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        found.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(found)
    }
}
