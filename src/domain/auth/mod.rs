//! Acting identity and team authorization rules

use std::fmt::Debug;

use crate::domain::team::Team;
use crate::domain::user::UserId;

/// The authenticated identity performing an operation
///
/// Authentication itself is external; the presentation layer builds an
/// `Actor` from the trusted identity the upstream proxy forwards.
#[derive(Debug, Clone)]
pub struct Actor {
    user_id: UserId,
    name: String,
    admin: bool,
}

impl Actor {
    pub fn new(user_id: UserId, name: impl Into<String>, admin: bool) -> Self {
        Self {
            user_id,
            name: name.into(),
            admin,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Owner-or-platform-admin check used by member management and
    /// team mutation paths
    pub fn can_manage(&self, team: &Team) -> bool {
        self.admin || team.is_owned_by(self.user_id)
    }
}

/// Authorization rules for team operations
///
/// Consulted before every state-changing or sensitive-read operation.
/// Membership-based visibility (a private team is readable by its
/// members) is layered on top by the services, which own the
/// membership store.
pub trait TeamPolicy: Send + Sync + Debug {
    /// Whether the actor (or an anonymous caller) may read the team
    fn can_read(&self, actor: Option<&Actor>, team: &Team) -> bool;

    /// Whether the actor may create teams
    fn can_create(&self, actor: &Actor) -> bool;

    /// Whether the actor may update the team
    fn can_update(&self, actor: &Actor, team: &Team) -> bool;

    /// Whether the actor may delete the team
    fn can_delete(&self, actor: &Actor, team: &Team) -> bool;
}

/// Default policy: public teams are readable by anyone, private teams by
/// their owner or a platform admin; mutation requires owner or admin.
#[derive(Debug, Clone, Default)]
pub struct RolePolicy;

impl TeamPolicy for RolePolicy {
    fn can_read(&self, actor: Option<&Actor>, team: &Team) -> bool {
        if team.is_public() {
            return true;
        }

        actor.is_some_and(|a| a.can_manage(team))
    }

    fn can_create(&self, _actor: &Actor) -> bool {
        true
    }

    fn can_update(&self, actor: &Actor, team: &Team) -> bool {
        actor.can_manage(team)
    }

    fn can_delete(&self, actor: &Actor, team: &Team) -> bool {
        actor.can_manage(team)
    }
}
