//! Log-only mailer for deployments without a mail provider

use async_trait::async_trait;
use tracing::info;

use crate::domain::mail::{Mailer, OutgoingEmail};
use crate::domain::DomainError;

/// Writes outgoing mail to the log instead of delivering it. Used when
/// no provider endpoint is configured, so invitation links remain
/// recoverable from the logs during development.
#[derive(Debug, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DomainError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "Mail delivery disabled; logging message instead"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_always_succeeds() {
        let mailer = LogMailer::new();
        let email = OutgoingEmail::new("jane@example.org", "Hello", "Body");

        assert!(mailer.send(&email).await.is_ok());
    }
}
