//! HTTP mail provider client
//!
//! Posts JSON to a provider endpoint with bearer auth. The workflow
//! layer decides what a failed send means; this client just reports it.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::mail::{Mailer, OutgoingEmail};
use crate::domain::DomainError;

/// Configuration for the HTTP mailer
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    /// Provider endpoint, e.g. "https://api.resend.com/emails"
    pub endpoint: String,
    /// Bearer token for the provider
    pub api_key: String,
    /// Sender address
    pub from: String,
    /// Request timeout
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mailer posting to an HTTP mail provider
pub struct HttpMailer {
    client: reqwest::Client,
    config: HttpMailerConfig,
}

impl fmt::Debug for HttpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMailer")
            .field("endpoint", &self.config.endpoint)
            .field("from", &self.config.from)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl HttpMailer {
    pub fn new(config: HttpMailerConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build mail client: {}", e))
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DomainError> {
        let body = SendEmailBody {
            from: &self.config.from,
            to: &email.to,
            subject: &email.subject,
            text: &email.body,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::delivery(format!("Mail request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DomainError::delivery(format!(
                "Mail provider returned HTTP {}: {}",
                status, detail
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(endpoint: String) -> HttpMailerConfig {
        HttpMailerConfig {
            endpoint,
            api_key: "test-key".to_string(),
            from: "teams@example.org".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = HttpMailer::new(config(format!("{}/emails", server.uri()))).unwrap();
        let email = OutgoingEmail::new("jane@example.org", "Invitation to a Team", "hello");

        mailer.send(&email).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_failure_is_delivery_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mailer = HttpMailer::new(config(format!("{}/emails", server.uri()))).unwrap();
        let email = OutgoingEmail::new("jane@example.org", "Invitation to a Team", "hello");

        let result = mailer.send(&email).await;
        assert!(matches!(result, Err(DomainError::Delivery { .. })));
    }
}
