//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_team_description, validate_team_name, TeamValidationError};
use crate::domain::user::UserId;

/// Team identifier (UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(Uuid);

impl TeamId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse from a string representation
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team entity
///
/// A named group with exactly one owner, a visibility flag and a set of
/// members (the membership edges live in `domain::membership`). The owner
/// is always enrolled as a member row at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name, globally unique
    name: String,
    /// Short description
    description: String,
    /// Whether the team is joinable without an invitation
    public: bool,
    /// The user who created the team
    owner_id: UserId,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with validated fields
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        public: bool,
        owner_id: UserId,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        let description = description.into();
        validate_team_name(&name)?;
        validate_team_description(&description)?;
        let now = Utc::now();

        Ok(Self {
            id: TeamId::generate(),
            name,
            description,
            public,
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a team from stored fields without re-validating
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TeamId,
        name: String,
        description: String,
        public: bool,
        owner_id: UserId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            public,
            owner_id,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether a user is the owner of this team
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    // Mutators

    /// Update the name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Update the description
    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), TeamValidationError> {
        let description = description.into();
        validate_team_description(&description)?;
        self.description = description;
        self.touch();
        Ok(())
    }

    /// Change the visibility flag
    pub fn set_public(&mut self, public: bool) {
        self.public = public;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::generate()
    }

    #[test]
    fn test_team_id_roundtrip() {
        let id = TeamId::generate();
        let parsed = TeamId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_team_creation() {
        let owner = owner();
        let team = Team::new("Data Cleaners", "We label datasets", true, owner).unwrap();

        assert_eq!(team.name(), "Data Cleaners");
        assert_eq!(team.description(), "We label datasets");
        assert!(team.is_public());
        assert!(team.is_owned_by(owner));
    }

    #[test]
    fn test_team_invalid_name() {
        assert!(Team::new("ab", "A valid description", true, owner()).is_err());
    }

    #[test]
    fn test_team_invalid_description() {
        assert!(Team::new("A valid name", "ab", true, owner()).is_err());
    }

    #[test]
    fn test_set_name_validates() {
        let mut team = Team::new("Valid name", "Valid description", true, owner()).unwrap();

        assert!(team.set_name("x").is_err());
        assert_eq!(team.name(), "Valid name");

        team.set_name("Renamed team").unwrap();
        assert_eq!(team.name(), "Renamed team");
    }

    #[test]
    fn test_set_public_touches() {
        let mut team = Team::new("Valid name", "Valid description", true, owner()).unwrap();
        let original_updated = team.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        team.set_public(false);
        assert!(!team.is_public());
        assert!(team.updated_at() > original_updated);
    }
}
