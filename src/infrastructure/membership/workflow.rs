//! Membership workflow service
//!
//! Join, invite, accept and removal flows on top of the membership
//! store. Public teams are joined directly; private teams hand out
//! signed invitation tokens delivered by email. Mail delivery is
//! best-effort: a failed send degrades to a warning on an otherwise
//! successful response.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::auth::Actor;
use crate::domain::cache::{key, Cache, CacheExt};
use crate::domain::mail::{Mailer, OutgoingEmail};
use crate::domain::membership::{Membership, MembershipRepository};
use crate::domain::team::{Team, TeamRepository};
use crate::domain::token::{InvitePayload, InviteTokenCodec, JOIN_PRIVATE_TEAM};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::team::TeamDirectory;

/// Tunables for the invitation flow
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Public base URL used to build invitation links
    pub base_url: String,
    /// How long an issued invitation token stays acceptable
    pub invite_max_age: Duration,
    /// TTL for cached member lists
    pub cache_ttl: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            invite_max_age: Duration::from_secs(3600),
            cache_ttl: Duration::from_secs(300),
        }
    }
}

/// What a join request resulted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A membership row was created
    Joined,
    /// The user was a member all along; treated as success
    AlreadyMember,
    /// A signed invitation was issued for a private team. `warning` is
    /// set when the invitation email could not be delivered.
    InvitationSent { warning: Option<String> },
}

/// Membership workflow over a team directory and the membership store
#[derive(Debug)]
pub struct MembershipWorkflow<T, M, U>
where
    T: TeamRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    directory: Arc<TeamDirectory<T, M, U>>,
    memberships: Arc<M>,
    users: Arc<U>,
    cache: Arc<dyn Cache>,
    codec: Arc<dyn InviteTokenCodec>,
    mailer: Arc<dyn Mailer>,
    config: WorkflowConfig,
}

impl<T, M, U> MembershipWorkflow<T, M, U>
where
    T: TeamRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    pub fn new(
        directory: Arc<TeamDirectory<T, M, U>>,
        memberships: Arc<M>,
        users: Arc<U>,
        cache: Arc<dyn Cache>,
        codec: Arc<dyn InviteTokenCodec>,
        mailer: Arc<dyn Mailer>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            directory,
            memberships,
            users,
            cache,
            codec,
            mailer,
            config,
        }
    }

    /// Join a team, or add/invite another user to it.
    ///
    /// With no target the actor joins the team themselves. Adding
    /// someone else requires owner or platform-admin rights. On a
    /// public team the membership row is written directly; a private
    /// team produces a signed invitation emailed to the target.
    pub async fn add_member(
        &self,
        actor: &Actor,
        team_name: &str,
        target: Option<&str>,
    ) -> Result<JoinOutcome, DomainError> {
        let team = self.directory.find_by_name(team_name).await?;
        let target_user = self.resolve_target(actor, target).await?;
        let self_service = target_user.id() == actor.user_id();

        info!(
            team = %team.name(),
            actor = %actor.name(),
            target = %target_user.name(),
            "Membership requested"
        );

        if !self_service && !actor.can_manage(&team) {
            return Err(DomainError::forbidden(
                "Only the team owner may add other users",
            ));
        }

        if self
            .memberships
            .exists(target_user.id(), team.id())
            .await?
        {
            return Ok(JoinOutcome::AlreadyMember);
        }

        if team.is_public() || (self_service && actor.can_manage(&team)) {
            return self.enroll(target_user.id(), &team).await;
        }

        if self_service {
            return Err(DomainError::forbidden(
                "An invitation is required to join this team",
            ));
        }

        self.invite(actor, &target_user, &team).await
    }

    /// Accept an invitation token and join the private team it names
    pub async fn accept_invitation(
        &self,
        actor: &Actor,
        token: &str,
    ) -> Result<JoinOutcome, DomainError> {
        let payload = self
            .codec
            .verify(token, JOIN_PRIVATE_TEAM, self.config.invite_max_age)?;

        if payload.user != actor.name() {
            return Err(DomainError::forbidden(
                "This invitation was issued to a different user",
            ));
        }

        let team = match self.directory.find_by_name(&payload.team).await {
            Ok(team) => team,
            // The team vanished between issue and acceptance
            Err(DomainError::NotFound { .. }) => {
                return Err(DomainError::forbidden("This invitation is no longer valid"));
            }
            Err(e) => return Err(e),
        };

        info!(team = %team.name(), actor = %actor.name(), "Accepting invitation");

        if self.memberships.exists(actor.user_id(), team.id()).await? {
            return Ok(JoinOutcome::AlreadyMember);
        }

        self.enroll(actor.user_id(), &team).await
    }

    /// Remove a member, or leave the team. Removing someone else
    /// requires owner or platform-admin rights; the owner can never be
    /// removed.
    pub async fn remove_member(
        &self,
        actor: &Actor,
        team_name: &str,
        target: Option<&str>,
    ) -> Result<(), DomainError> {
        let team = self.directory.find_by_name(team_name).await?;
        let target_user = self.resolve_target(actor, target).await?;
        let self_service = target_user.id() == actor.user_id();

        info!(
            team = %team.name(),
            actor = %actor.name(),
            target = %target_user.name(),
            "Removing member"
        );

        if !self_service && !actor.can_manage(&team) {
            return Err(DomainError::forbidden(
                "Only the team owner may remove other users",
            ));
        }

        if team.is_owned_by(target_user.id()) {
            return Err(DomainError::forbidden(
                "The team owner cannot be removed from the team",
            ));
        }

        self.memberships
            .remove(target_user.id(), team.id())
            .await?;
        self.invalidate(&team).await?;

        Ok(())
    }

    /// The member list of a team, subject to the team's visibility
    pub async fn members(
        &self,
        actor: Option<&Actor>,
        team_name: &str,
    ) -> Result<Vec<User>, DomainError> {
        let team = self.directory.find_by_name(team_name).await?;
        self.directory.check_visibility(actor, &team).await?;

        let cache_key = key::member_list(team.id());

        if let Some(cached) = self.cache.get::<Vec<User>>(&cache_key).await? {
            return Ok(cached);
        }

        let memberships = self.memberships.list_by_team(team.id()).await?;
        let ids: Vec<_> = memberships.iter().map(|m| m.user_id()).collect();
        let members = self.users.get_many(&ids).await?;

        self.cache.set(&cache_key, &members, self.config.cache_ttl).await?;
        Ok(members)
    }

    async fn resolve_target(
        &self,
        actor: &Actor,
        target: Option<&str>,
    ) -> Result<User, DomainError> {
        let name = target.unwrap_or_else(|| actor.name());

        match target {
            Some(name) => self.users.find_by_name(name).await?,
            None => self.users.get(actor.user_id()).await?,
        }
        .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", name)))
    }

    async fn enroll(
        &self,
        user_id: crate::domain::user::UserId,
        team: &Team,
    ) -> Result<JoinOutcome, DomainError> {
        match self.memberships.add(Membership::new(user_id, team.id())).await {
            Ok(_) => {
                self.invalidate(team).await?;
                Ok(JoinOutcome::Joined)
            }
            // A concurrent join beat us to the row
            Err(DomainError::DuplicateMembership { .. }) => Ok(JoinOutcome::AlreadyMember),
            Err(e) => Err(e),
        }
    }

    async fn invite(
        &self,
        actor: &Actor,
        target: &User,
        team: &Team,
    ) -> Result<JoinOutcome, DomainError> {
        let payload = InvitePayload::new(target.name(), team.name());
        let token = self.codec.issue(&payload, JOIN_PRIVATE_TEAM)?;

        let join_url = format!(
            "{}/api/v1/teams/join?token={}",
            self.config.base_url.trim_end_matches('/'),
            token
        );

        let email = OutgoingEmail::new(
            target.email_addr(),
            format!("Invitation to join the team {}", team.name()),
            format!(
                "Hi {},\n\n{} has invited you to join the team {}.\n\n\
                 Follow this link to accept the invitation:\n{}\n\n\
                 The link expires in {} minutes.",
                target.fullname(),
                actor.name(),
                team.name(),
                join_url,
                self.config.invite_max_age.as_secs() / 60,
            ),
        );

        // Best-effort delivery: the invitation itself already succeeded
        let warning = match self.mailer.send(&email).await {
            Ok(()) => {
                debug!(to = %target.email_addr(), team = %team.name(), "Invitation sent");
                None
            }
            Err(e) => {
                warn!(to = %target.email_addr(), error = %e, "Invitation email failed");
                Some(format!("The invitation email could not be delivered: {}", e))
            }
        };

        Ok(JoinOutcome::InvitationSent { warning })
    }

    async fn invalidate(&self, team: &Team) -> Result<(), DomainError> {
        self.cache.delete(&key::member_count(team.id())).await?;
        self.cache.delete(&key::member_list(team.id())).await?;
        self.cache.delete(&key::team_summary(team.name())).await?;
        // Rank is relative, so one team's change may shift every other
        self.cache.delete_pattern(&key::rank_pattern()).await?;
        Ok(())
    }
}
