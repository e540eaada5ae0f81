pub mod directory;
pub mod in_memory_repository;
pub mod postgres_repository;

pub use directory::{
    CreateTeamRequest, TeamDirectory, TeamPage, TeamScope, TeamSummary, UpdateTeamRequest,
};
pub use in_memory_repository::InMemoryTeamRepository;
pub use postgres_repository::PostgresTeamRepository;
