//! Mail port
//!
//! Delivery is best-effort: the membership workflow treats a failed send
//! as a warning on an otherwise successful response, never as a rollback.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// An email ready for delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Outbound mail transport
#[async_trait]
pub trait Mailer: Send + Sync + Debug {
    /// Send a single email; errors are `Delivery` failures
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock mailer recording sent messages
    #[derive(Debug, Default)]
    pub struct MockMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail: Mutex<bool>,
    }

    impl MockMailer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            let mailer = Self::default();
            *mailer.fail.lock().unwrap() = true;
            mailer
        }

        pub fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), DomainError> {
            if *self.fail.lock().unwrap() {
                return Err(DomainError::delivery("mail provider unreachable"));
            }

            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }
}
