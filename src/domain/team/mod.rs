//! Team domain: entity, validation and repository trait

pub mod entity;
pub mod repository;
pub mod validation;

pub use entity::{Team, TeamId};
pub use repository::{TeamQuery, TeamRepository};
pub use validation::{validate_team_description, validate_team_name, TeamValidationError};
