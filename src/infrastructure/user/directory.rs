//! User lookup service
//!
//! Read-only: users are owned by an external subsystem. The search path
//! optionally annotates each hit with whether the user already belongs
//! to a given team, which the invite screens need.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::membership::MembershipRepository;
use crate::domain::team::TeamId;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// A search hit, optionally annotated with team membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMatch {
    pub user: User,
    /// Whether the user is already a member of the team the search was
    /// scoped to; `None` when the search was not team-scoped
    pub member: Option<bool>,
}

/// User lookup service over the read-only user table
#[derive(Debug)]
pub struct UserDirectory<U: UserRepository, M: MembershipRepository> {
    users: Arc<U>,
    memberships: Arc<M>,
}

impl<U: UserRepository, M: MembershipRepository> UserDirectory<U, M> {
    pub fn new(users: Arc<U>, memberships: Arc<M>) -> Self {
        Self { users, memberships }
    }

    /// Get a user by unique login name
    pub async fn find_by_name(&self, name: &str) -> Result<User, DomainError> {
        self.users
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", name)))
    }

    /// Case-insensitive substring search on name or fullname. When a
    /// team is given, each hit is annotated with its membership state.
    pub async fn search(
        &self,
        query: &str,
        team: Option<TeamId>,
    ) -> Result<Vec<UserMatch>, DomainError> {
        debug!(query = %query, "Searching users");

        let found = self.users.search(query).await?;
        let mut matches = Vec::with_capacity(found.len());

        for user in found {
            let member = match team {
                Some(team_id) => Some(self.memberships.exists(user.id(), team_id).await?),
                None => None,
            };

            matches.push(UserMatch { user, member });
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::Membership;
    use crate::domain::user::UserId;
    use crate::infrastructure::membership::InMemoryMembershipRepository;
    use crate::infrastructure::user::InMemoryUserRepository;

    fn directory() -> (
        UserDirectory<InMemoryUserRepository, InMemoryMembershipRepository>,
        Arc<InMemoryUserRepository>,
        Arc<InMemoryMembershipRepository>,
    ) {
        let users = Arc::new(InMemoryUserRepository::new());
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let directory = UserDirectory::new(users.clone(), memberships.clone());
        (directory, users, memberships)
    }

    fn user(name: &str, fullname: &str) -> User {
        User::new(
            UserId::generate(),
            name,
            fullname,
            format!("{name}@example.org"),
            false,
            0,
        )
    }

    #[tokio::test]
    async fn test_find_by_name_not_found() {
        let (directory, _, _) = directory();

        let result = directory.find_by_name("ghost").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search_without_team_context() {
        let (directory, users, _) = directory();
        users.insert(user("jane", "Jane Doe"));

        let matches = directory.search("jane", None).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].member.is_none());
    }

    #[tokio::test]
    async fn test_search_annotates_membership() {
        let (directory, users, memberships) = directory();
        let jane = user("jane", "Jane Doe");
        let jane_id = jane.id();
        users.insert(jane);
        users.insert(user("john", "John Doe"));

        let team_id = TeamId::generate();
        memberships
            .add(Membership::new(jane_id, team_id))
            .await
            .unwrap();

        let mut matches = directory.search("doe", Some(team_id)).await.unwrap();
        matches.sort_by(|a, b| a.user.name().cmp(b.user.name()));

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].user.name(), "jane");
        assert_eq!(matches[0].member, Some(true));
        assert_eq!(matches[1].member, Some(false));
    }
}
