//! Team directory service
//!
//! CRUD and browsing over teams with cached read paths. Every mutation
//! invalidates the affected cache keys before reporting success, so a
//! read immediately after a write never sees a stale view.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::auth::{Actor, TeamPolicy};
use crate::domain::cache::{key, Cache, CacheExt};
use crate::domain::membership::{Membership, MembershipRepository};
use crate::domain::team::{
    validate_team_description, validate_team_name, Team, TeamQuery, TeamRepository,
};
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

/// Request for updating a team
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
}

/// Listing and search scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamScope {
    /// Every team
    All,
    /// Public teams only
    Public,
    /// Private teams only (platform admins)
    Private,
    /// Teams the actor belongs to
    Mine,
}

impl TeamScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Public => "public",
            Self::Private => "private",
            Self::Mine => "mine",
        }
    }
}

impl std::str::FromStr for TeamScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "mine" | "myteams" => Ok(Self::Mine),
            _ => Err(DomainError::validation(format!(
                "Unknown team scope: {}. Valid scopes: all, public, private, mine",
                s
            ))),
        }
    }
}

/// One page of a team listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPage {
    pub teams: Vec<Team>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Team detail aggregate: the team plus its derived numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team: Team,
    pub member_count: i64,
    /// 1-based position among all teams ordered by score descending
    pub rank: usize,
    /// Sum of member scores
    pub score: i64,
}

/// Team directory service over team/membership/user repositories
#[derive(Debug)]
pub struct TeamDirectory<T, M, U>
where
    T: TeamRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    teams: Arc<T>,
    memberships: Arc<M>,
    users: Arc<U>,
    cache: Arc<dyn Cache>,
    policy: Arc<dyn TeamPolicy>,
    cache_ttl: Duration,
}

impl<T, M, U> TeamDirectory<T, M, U>
where
    T: TeamRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    pub fn new(
        teams: Arc<T>,
        memberships: Arc<M>,
        users: Arc<U>,
        cache: Arc<dyn Cache>,
        policy: Arc<dyn TeamPolicy>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            teams,
            memberships,
            users,
            cache,
            policy,
            cache_ttl,
        }
    }

    /// Create a new team. The owner is enrolled as a member row in the
    /// same logical operation so member counts stay consistent.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateTeamRequest,
    ) -> Result<Team, DomainError> {
        info!(name = %request.name, actor = %actor.name(), "Creating team");

        if !self.policy.can_create(actor) {
            return Err(DomainError::forbidden("You may not create teams"));
        }

        validate_team_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_team_description(&request.description)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.teams.find_by_name(&request.name).await?.is_some() {
            return Err(DomainError::validation(format!(
                "The team name '{}' is already taken",
                request.name
            )));
        }

        let team = Team::new(
            &request.name,
            &request.description,
            request.public,
            actor.user_id(),
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        let team = self.teams.create(team).await?;

        // Owner auto-enrollment; compensate the team insert if it fails
        if let Err(e) = self
            .memberships
            .add(Membership::new(actor.user_id(), team.id()))
            .await
        {
            warn!(team = %team.name(), "Owner enrollment failed, rolling back team");
            self.teams.delete(team.id()).await?;
            return Err(e);
        }

        self.invalidate_listings().await?;
        Ok(team)
    }

    /// Update name, description or visibility. Owner or platform admin only.
    pub async fn update(
        &self,
        actor: &Actor,
        name: &str,
        request: UpdateTeamRequest,
    ) -> Result<Team, DomainError> {
        info!(team = %name, actor = %actor.name(), "Updating team");

        let mut team = self.find_by_name(name).await?;

        if !self.policy.can_update(actor, &team) {
            return Err(DomainError::forbidden("You may not update this team"));
        }

        if let Some(new_name) = &request.name {
            if new_name != team.name() {
                if self.teams.find_by_name(new_name).await?.is_some() {
                    return Err(DomainError::validation(format!(
                        "The team name '{}' is already taken",
                        new_name
                    )));
                }

                team.set_name(new_name)
                    .map_err(|e| DomainError::validation(e.to_string()))?;
            }
        }

        if let Some(description) = &request.description {
            team.set_description(description)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(public) = request.public {
            team.set_public(public);
        }

        let team = self.teams.update(team).await?;

        // The summary may be cached under the old name after a rename
        self.cache.delete(&key::team_summary(name)).await?;
        self.cache.delete(&key::team_summary(team.name())).await?;
        self.invalidate_listings().await?;

        Ok(team)
    }

    /// Delete a team and all its membership rows. Owner or platform
    /// admin only.
    pub async fn delete(&self, actor: &Actor, name: &str) -> Result<(), DomainError> {
        info!(team = %name, actor = %actor.name(), "Deleting team");

        let team = self.find_by_name(name).await?;

        if !self.policy.can_delete(actor, &team) {
            return Err(DomainError::forbidden("You may not delete this team"));
        }

        // Explicit cascade; the schema backs this with ON DELETE CASCADE
        let removed = self.memberships.remove_by_team(team.id()).await?;
        debug!(team = %name, members = removed, "Removed team memberships");

        self.teams.delete(team.id()).await?;

        self.cache.delete(&key::team_summary(name)).await?;
        self.cache.delete(&key::member_count(team.id())).await?;
        self.cache.delete(&key::member_list(team.id())).await?;
        self.invalidate_listings().await?;

        Ok(())
    }

    /// Get a team by unique name
    pub async fn find_by_name(&self, name: &str) -> Result<Team, DomainError> {
        self.teams
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", name)))
    }

    /// Case-insensitive substring search on team name
    pub async fn search(
        &self,
        actor: Option<&Actor>,
        query: &str,
        scope: TeamScope,
    ) -> Result<Vec<Team>, DomainError> {
        debug!(query = %query, scope = %scope.as_str(), "Searching teams");

        let found = self.teams.search(query).await?;

        match scope {
            TeamScope::All => Ok(found),
            TeamScope::Public => Ok(found.into_iter().filter(|t| t.is_public()).collect()),
            TeamScope::Private => {
                let actor = require_actor(actor)?;

                if !actor.is_admin() {
                    return Err(DomainError::forbidden(
                        "Only platform admins may browse private teams",
                    ));
                }

                Ok(found.into_iter().filter(|t| !t.is_public()).collect())
            }
            TeamScope::Mine => {
                let actor = require_actor(actor)?;
                let mut mine = Vec::new();

                for team in found {
                    if self.memberships.exists(actor.user_id(), team.id()).await? {
                        mine.push(team);
                    }
                }

                Ok(mine)
            }
        }
    }

    /// One page of a team listing for a scope
    pub async fn list(
        &self,
        actor: Option<&Actor>,
        scope: TeamScope,
        page: usize,
        per_page: usize,
    ) -> Result<TeamPage, DomainError> {
        let page = page.max(1);
        let per_page = per_page.max(1);

        match scope {
            TeamScope::All => self.list_cached(None, scope, page, per_page).await,
            TeamScope::Public => self.list_cached(Some(true), scope, page, per_page).await,
            TeamScope::Private => {
                let actor = require_actor(actor)?;

                if !actor.is_admin() {
                    return Err(DomainError::forbidden(
                        "Only platform admins may browse private teams",
                    ));
                }

                self.list_cached(Some(false), scope, page, per_page).await
            }
            TeamScope::Mine => {
                // Per-user view; never shared, never cached
                let actor = require_actor(actor)?;

                let memberships = self.memberships.list_by_user(actor.user_id()).await?;
                let ids: Vec<_> = memberships.iter().map(|m| m.team_id()).collect();
                let teams = self.teams.get_many(&ids).await?;

                let total = teams.len();
                let teams = teams
                    .into_iter()
                    .skip(page.saturating_sub(1).saturating_mul(per_page))
                    .take(per_page)
                    .collect();

                Ok(TeamPage {
                    teams,
                    total,
                    page,
                    per_page,
                })
            }
        }
    }

    async fn list_cached(
        &self,
        public: Option<bool>,
        scope: TeamScope,
        page: usize,
        per_page: usize,
    ) -> Result<TeamPage, DomainError> {
        let cache_key = key::listing(scope.as_str(), page, per_page);

        if let Some(cached) = self.cache.get::<TeamPage>(&cache_key).await? {
            return Ok(cached);
        }

        // Saturating offset math; page arrives unchecked from the query string
        let mut query = TeamQuery::new()
            .with_limit(per_page)
            .with_offset(page.saturating_sub(1).saturating_mul(per_page));
        query.public = public;

        let teams = self.teams.list(&query).await?;

        let mut count_query = TeamQuery::new();
        count_query.public = public;
        let total = self.teams.count(&count_query).await?;

        let result = TeamPage {
            teams,
            total,
            page,
            per_page,
        };

        self.cache.set(&cache_key, &result, self.cache_ttl).await?;
        Ok(result)
    }

    /// Team detail aggregate. Private teams are visible to their
    /// members, their owner and platform admins only.
    pub async fn summary(
        &self,
        actor: Option<&Actor>,
        name: &str,
    ) -> Result<TeamSummary, DomainError> {
        let team = self.find_by_name(name).await?;
        self.check_visibility(actor, &team).await?;

        let cache_key = key::team_summary(name);

        if let Some(cached) = self.cache.get::<TeamSummary>(&cache_key).await? {
            return Ok(cached);
        }

        let member_count = self.member_count(team.id()).await?;
        let (rank, score) = self.rank_of(team.id()).await?;

        let summary = TeamSummary {
            team,
            member_count,
            rank,
            score,
        };

        self.cache.set(&cache_key, &summary, self.cache_ttl).await?;
        Ok(summary)
    }

    /// Member count served through its own cache key, so membership
    /// writers can drop it without touching the rest of the summary.
    async fn member_count(
        &self,
        team_id: crate::domain::team::TeamId,
    ) -> Result<i64, DomainError> {
        let cache_key = key::member_count(team_id);

        if let Some(cached) = self.cache.get::<i64>(&cache_key).await? {
            return Ok(cached);
        }

        let count = self.memberships.count_by_team(team_id).await?;

        self.cache.set(&cache_key, &count, self.cache_ttl).await?;
        Ok(count)
    }

    /// Rank and score of a team: score is the sum of member scores,
    /// rank the 1-based position by descending score across all teams.
    async fn rank_of(
        &self,
        team_id: crate::domain::team::TeamId,
    ) -> Result<(usize, i64), DomainError> {
        let cache_key = key::team_rank(team_id);

        if let Some(cached) = self.cache.get::<(usize, i64)>(&cache_key).await? {
            return Ok(cached);
        }

        let all_teams = self.teams.list(&TeamQuery::new()).await?;
        let mut scores = Vec::with_capacity(all_teams.len());

        for team in &all_teams {
            scores.push((team.id(), self.team_score(team.id()).await?));
        }

        scores.sort_by(|a, b| b.1.cmp(&a.1));

        let position = scores
            .iter()
            .position(|(id, _)| *id == team_id)
            .ok_or_else(|| DomainError::not_found("Team not found while ranking"))?;
        let result = (position + 1, scores[position].1);

        self.cache.set(&cache_key, &result, self.cache_ttl).await?;
        Ok(result)
    }

    async fn team_score(
        &self,
        team_id: crate::domain::team::TeamId,
    ) -> Result<i64, DomainError> {
        let memberships = self.memberships.list_by_team(team_id).await?;
        let ids: Vec<_> = memberships.iter().map(|m| m.user_id()).collect();
        let members = self.users.get_many(&ids).await?;

        Ok(members.iter().map(|u| u.score()).sum())
    }

    /// Visibility rule shared by the read paths: public, or the policy
    /// allows it (owner/admin), or the actor is a member.
    pub(crate) async fn check_visibility(
        &self,
        actor: Option<&Actor>,
        team: &Team,
    ) -> Result<(), DomainError> {
        if self.policy.can_read(actor, team) {
            return Ok(());
        }

        if let Some(actor) = actor {
            if self.memberships.exists(actor.user_id(), team.id()).await? {
                return Ok(());
            }
        }

        Err(DomainError::forbidden("You may not view this team"))
    }

    async fn invalidate_listings(&self) -> Result<(), DomainError> {
        self.cache.delete_pattern(&key::listing_pattern()).await?;
        self.cache.delete_pattern(&key::rank_pattern()).await?;
        Ok(())
    }
}

fn require_actor(actor: Option<&Actor>) -> Result<&Actor, DomainError> {
    actor.ok_or_else(|| DomainError::forbidden("Sign in to browse these teams"))
}
