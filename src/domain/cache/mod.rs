//! Cache port: dyn-safe trait, typed helpers and key layout

pub mod key;
pub mod repository;

pub use repository::{Cache, CacheExt};
