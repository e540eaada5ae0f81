pub mod directory;
pub mod in_memory_repository;
pub mod postgres_repository;

pub use directory::{UserDirectory, UserMatch};
pub use in_memory_repository::InMemoryUserRepository;
pub use postgres_repository::PostgresUserRepository;
