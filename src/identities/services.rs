use std::sync::Arc;

use anyhow::Context;
use semval::Validate;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    email::{
        clients::{EmailClient, MailgunMailer, Message},
        templates::DefaultTemplate,
    },
    passwords::{Hash, Password},
    repos::{DynAccountDirectory, SupabaseAccounts},
    supabase::SupabaseConnection,
};

use super::config::{DynEmailTemplate, ResetConfig, ResetConfigInvalidity};

pub const RESET_SUCCESSFUL: &str =
    "Password reset successful. An email has been sent with the new password.";
pub const USER_NOT_FOUND: &str = "User not found";
pub const UPDATE_FAILED: &str = "Failed to update password";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

pub type DynEmailClient = Arc<dyn EmailClient>;

/// The outcome of a password reset.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResetResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResetResult {
    fn succeeded() -> Self {
        Self {
            success: true,
            message: RESET_SUCCESSFUL.to_owned(),
            error: None,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_owned(),
            error: None,
        }
    }

    fn unexpected(error: &anyhow::Error) -> Self {
        Self {
            success: false,
            message: UNEXPECTED_ERROR.to_owned(),
            error: Some(format!("{:#}", error)),
        }
    }

    pub fn is_user_not_found(&self) -> bool {
        !self.success && self.message == USER_NOT_FOUND
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more configuration values are missing or out of range.
    #[error("invalid password reset configuration: {0:?}")]
    Invalid(semval::context::Context<ResetConfigInvalidity>),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A service object that overwrites a user's password with a generated one and
/// emails it to them.
///
/// Resets are not coordinated with each other. Two concurrent resets for the
/// same address race, and the last write to the directory wins. Callers that
/// need rate limiting, serialization per address, or a deadline must provide
/// it around [`PasswordResetService::reset_password_by_email`].
#[derive(Clone)]
pub struct PasswordResetService {
    directory: DynAccountDirectory,
    email_client: DynEmailClient,
    email_template: DynEmailTemplate,
    from: String,
    generated_password_length: usize,
    hash_cost_factor: u32,
    notification_domain: String,
    subject: String,
}

impl PasswordResetService {
    /// Create a service backed by Supabase and Mailgun.
    ///
    /// # Returns
    ///
    /// A [`Result`] containing the service, or a [`ConfigError`] if the
    /// configuration is invalid.
    pub fn new(config: ResetConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client.")?;

        let connection = SupabaseConnection::new(
            client.clone(),
            &config.directory_endpoint,
            config.directory_credential.clone(),
        );
        let directory = Arc::new(SupabaseAccounts::new(
            connection,
            &config.options.directory_table,
        ));
        let email_client = Arc::new(MailgunMailer::new(
            client,
            &config.options.notification_api_base,
            config.notification_credential.clone(),
        ));

        Ok(Self::from_validated(config, directory, email_client)?)
    }

    /// Create a service that uses the provided collaborators instead of the
    /// hosted providers. The configuration is validated the same way as in
    /// [`PasswordResetService::new`].
    ///
    /// # Arguments
    ///
    /// * `config` - The service configuration.
    /// * `directory` - Looks up accounts and stores credential hashes.
    /// * `email_client` - Delivers the new password.
    pub fn with_clients(
        config: ResetConfig,
        directory: DynAccountDirectory,
        email_client: DynEmailClient,
    ) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        Ok(Self::from_validated(config, directory, email_client)?)
    }

    fn from_validated(
        config: ResetConfig,
        directory: DynAccountDirectory,
        email_client: DynEmailClient,
    ) -> anyhow::Result<Self> {
        let options = config.options;
        let email_template: DynEmailTemplate = match options.email_template.clone() {
            Some(template) => template,
            None => Arc::new(DefaultTemplate::new()?),
        };

        Ok(Self {
            directory,
            email_client,
            email_template,
            from: options.from_header(),
            generated_password_length: options.generated_password_length,
            hash_cost_factor: options.hash_cost_factor,
            notification_domain: config.notification_domain,
            subject: options.subject,
        })
    }

    /// Replace the password of the account registered with an email address
    /// and send the new password to that address.
    ///
    /// This never fails. Every error is logged and reported through the
    /// returned [`ResetResult`].
    ///
    /// The new hash is stored before the email is sent. If sending fails, the
    /// account keeps a password its owner was never told, and the result is
    /// reported as an unexpected error whose detail says so.
    ///
    /// # Arguments
    ///
    /// * `email` - The address of the account. This must match exactly.
    pub async fn reset_password_by_email(&self, email: &str) -> ResetResult {
        match self.reset(email).await {
            Ok(result) => result,
            Err(error) => {
                error!(?error, "Unexpected error while resetting password.");

                ResetResult::unexpected(&error)
            }
        }
    }

    async fn reset(&self, email: &str) -> anyhow::Result<ResetResult> {
        let account = match self.directory.find_by_email(email).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                info!("No account found for password reset.");

                return Ok(ResetResult::failed(USER_NOT_FOUND));
            }
            Err(error) => {
                warn!(?error, "Failed to look up account for password reset.");

                return Ok(ResetResult::failed(USER_NOT_FOUND));
            }
        };

        let length = self.generated_password_length;
        let cost = self.hash_cost_factor;
        let (password, hash) = tokio::task::spawn_blocking(move || {
            let password = Password::generate(length);
            let hash = Hash::new(&password, cost)?;

            Ok::<_, anyhow::Error>((password, hash))
        })
        .await
        .context("Password hashing task failed.")?
        .context("Failed to hash password.")?;

        if let Err(error) = self
            .directory
            .update_credential_hash(&account.id, hash.value())
            .await
        {
            error!(?error, account_id = %account.id, "Failed to update password.");

            return Ok(ResetResult::failed(UPDATE_FAILED));
        }

        let text = self
            .email_template
            .render(email, password.as_str())
            .context("Password was updated but the notification email could not be rendered")?;

        let message = Message {
            from: self.from.clone(),
            to: email.to_owned(),
            subject: self.subject.clone(),
            text,
        };

        self.email_client
            .send(&message, &self.notification_domain)
            .await
            .context("Password was updated but the notification email could not be sent")?;

        info!(account_id = %account.id, "Reset password.");

        Ok(ResetResult::succeeded())
    }
}
