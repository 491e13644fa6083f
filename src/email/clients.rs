use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::remote_err::ensure_success;

pub struct Message {
    /// Sender in `Name <address>` form.
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[async_trait]
pub trait EmailClient: Send + Sync {
    /// Send a plain text message through a sending domain.
    async fn send(&self, message: &Message, domain: &str) -> Result<()>;
}

/// Sends email through the Mailgun messages API.
pub struct MailgunMailer {
    api_base: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl MailgunMailer {
    /// Create a new mailer.
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to send requests with.
    /// * `api_base` - Base URL of the API, for example
    ///   `https://api.mailgun.net` or `https://api.eu.mailgun.net`.
    /// * `api_key` - Private API key of the Mailgun account.
    pub fn new(client: reqwest::Client, api_base: &str, api_key: SecretString) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_owned(),
            api_key,
            client,
        }
    }

    fn messages_url(&self, domain: &str) -> String {
        format!("{}/v3/{}/messages", self.api_base, domain)
    }
}

#[async_trait]
impl EmailClient for MailgunMailer {
    async fn send(&self, message: &Message, domain: &str) -> Result<()> {
        let params = [
            ("from", message.from.as_str()),
            ("to", message.to.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.text.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url(domain))
            .basic_auth("api", Some(self.api_key.expose_secret()))
            .form(&params)
            .send()
            .await
            .context("Failed to reach Mailgun.")?;

        ensure_success("Mailgun", response).await?;
        info!(subject = %message.subject, "Sent email via Mailgun.");

        Ok(())
    }
}
