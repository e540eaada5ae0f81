//! Outbound mail transport

pub mod http_mailer;
pub mod log_mailer;

pub use http_mailer::{HttpMailer, HttpMailerConfig};
pub use log_mailer::LogMailer;
