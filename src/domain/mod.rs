//! Domain layer: entities, ports and errors

pub mod auth;
pub mod cache;
pub mod error;
pub mod mail;
pub mod membership;
pub mod team;
pub mod token;
pub mod user;

pub use error::DomainError;
