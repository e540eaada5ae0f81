//! Application state for shared services

use std::sync::Arc;

use crate::domain::auth::Actor;
use crate::domain::membership::MembershipRepository;
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::membership::{JoinOutcome, MembershipWorkflow};
use crate::infrastructure::team::{
    CreateTeamRequest, TeamDirectory, TeamPage, TeamScope, TeamSummary, UpdateTeamRequest,
};
use crate::infrastructure::user::{UserDirectory, UserMatch};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub teams: Arc<dyn TeamApi>,
    pub memberships: Arc<dyn MembershipApi>,
    pub users: Arc<dyn UserApi>,
}

/// Team directory operations exposed to handlers
#[async_trait::async_trait]
pub trait TeamApi: Send + Sync {
    async fn create(&self, actor: &Actor, request: CreateTeamRequest)
        -> Result<Team, DomainError>;
    async fn update(
        &self,
        actor: &Actor,
        name: &str,
        request: UpdateTeamRequest,
    ) -> Result<Team, DomainError>;
    async fn delete(&self, actor: &Actor, name: &str) -> Result<(), DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Team, DomainError>;
    async fn summary(&self, actor: Option<&Actor>, name: &str)
        -> Result<TeamSummary, DomainError>;
    async fn list(
        &self,
        actor: Option<&Actor>,
        scope: TeamScope,
        page: usize,
        per_page: usize,
    ) -> Result<TeamPage, DomainError>;
    async fn search(
        &self,
        actor: Option<&Actor>,
        query: &str,
        scope: TeamScope,
    ) -> Result<Vec<Team>, DomainError>;
}

/// Membership workflow operations exposed to handlers
#[async_trait::async_trait]
pub trait MembershipApi: Send + Sync {
    async fn add_member(
        &self,
        actor: &Actor,
        team_name: &str,
        target: Option<&str>,
    ) -> Result<JoinOutcome, DomainError>;
    async fn accept_invitation(
        &self,
        actor: &Actor,
        token: &str,
    ) -> Result<JoinOutcome, DomainError>;
    async fn remove_member(
        &self,
        actor: &Actor,
        team_name: &str,
        target: Option<&str>,
    ) -> Result<(), DomainError>;
    async fn members(&self, actor: Option<&Actor>, team_name: &str)
        -> Result<Vec<User>, DomainError>;
}

/// User lookup operations exposed to handlers
#[async_trait::async_trait]
pub trait UserApi: Send + Sync {
    async fn search(
        &self,
        query: &str,
        team: Option<TeamId>,
    ) -> Result<Vec<UserMatch>, DomainError>;
}

// Implement the API traits for the actual services

#[async_trait::async_trait]
impl<T, M, U> TeamApi for TeamDirectory<T, M, U>
where
    T: TeamRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        actor: &Actor,
        request: CreateTeamRequest,
    ) -> Result<Team, DomainError> {
        TeamDirectory::create(self, actor, request).await
    }

    async fn update(
        &self,
        actor: &Actor,
        name: &str,
        request: UpdateTeamRequest,
    ) -> Result<Team, DomainError> {
        TeamDirectory::update(self, actor, name, request).await
    }

    async fn delete(&self, actor: &Actor, name: &str) -> Result<(), DomainError> {
        TeamDirectory::delete(self, actor, name).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Team, DomainError> {
        TeamDirectory::find_by_name(self, name).await
    }

    async fn summary(
        &self,
        actor: Option<&Actor>,
        name: &str,
    ) -> Result<TeamSummary, DomainError> {
        TeamDirectory::summary(self, actor, name).await
    }

    async fn list(
        &self,
        actor: Option<&Actor>,
        scope: TeamScope,
        page: usize,
        per_page: usize,
    ) -> Result<TeamPage, DomainError> {
        TeamDirectory::list(self, actor, scope, page, per_page).await
    }

    async fn search(
        &self,
        actor: Option<&Actor>,
        query: &str,
        scope: TeamScope,
    ) -> Result<Vec<Team>, DomainError> {
        TeamDirectory::search(self, actor, query, scope).await
    }
}

#[async_trait::async_trait]
impl<T, M, U> MembershipApi for MembershipWorkflow<T, M, U>
where
    T: TeamRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    async fn add_member(
        &self,
        actor: &Actor,
        team_name: &str,
        target: Option<&str>,
    ) -> Result<JoinOutcome, DomainError> {
        MembershipWorkflow::add_member(self, actor, team_name, target).await
    }

    async fn accept_invitation(
        &self,
        actor: &Actor,
        token: &str,
    ) -> Result<JoinOutcome, DomainError> {
        MembershipWorkflow::accept_invitation(self, actor, token).await
    }

    async fn remove_member(
        &self,
        actor: &Actor,
        team_name: &str,
        target: Option<&str>,
    ) -> Result<(), DomainError> {
        MembershipWorkflow::remove_member(self, actor, team_name, target).await
    }

    async fn members(
        &self,
        actor: Option<&Actor>,
        team_name: &str,
    ) -> Result<Vec<User>, DomainError> {
        MembershipWorkflow::members(self, actor, team_name).await
    }
}

#[async_trait::async_trait]
impl<U, M> UserApi for UserDirectory<U, M>
where
    U: UserRepository,
    M: MembershipRepository,
{
    async fn search(
        &self,
        query: &str,
        team: Option<TeamId>,
    ) -> Result<Vec<UserMatch>, DomainError> {
        UserDirectory::search(self, query, team).await
    }
}
