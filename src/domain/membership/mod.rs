//! Membership domain: the User2Team association

pub mod entity;
pub mod repository;

pub use entity::Membership;
pub use repository::MembershipRepository;
