pub mod in_memory_repository;
pub mod postgres_repository;
pub mod workflow;

pub use in_memory_repository::InMemoryMembershipRepository;
pub use postgres_repository::PostgresMembershipRepository;
pub use workflow::{JoinOutcome, MembershipWorkflow, WorkflowConfig};
