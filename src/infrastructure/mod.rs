pub mod cache;
pub mod logging;
pub mod mail;
pub mod membership;
pub mod storage;
pub mod team;
pub mod token;
pub mod user;
