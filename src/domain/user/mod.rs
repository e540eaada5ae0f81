//! User domain: read-only entity and repository trait

pub mod entity;
pub mod repository;

pub use entity::{User, UserId};
pub use repository::UserRepository;
