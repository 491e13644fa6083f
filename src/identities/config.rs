use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use semval::prelude::*;

use crate::{
    email::templates::EmailTemplate,
    passwords::{MAX_COST, MAX_PASSWORD_BYTES, MIN_COST},
};

pub type DynEmailTemplate = Arc<dyn EmailTemplate>;

/// Connection details and tuning for a password reset service.
#[derive(Clone)]
pub struct ResetConfig {
    /// URL of the Supabase project, e.g. `https://<project>.supabase.co`.
    pub directory_endpoint: String,
    /// Service-role key for the Supabase project.
    pub directory_credential: SecretString,
    /// Private API key for Mailgun.
    pub notification_credential: SecretString,
    /// The Mailgun sending domain.
    pub notification_domain: String,
    pub options: ResetOptions,
}

/// Optional settings. Override individual fields with struct update syntax:
///
/// ```
/// use supabase_password_reset::identities::config::ResetOptions;
///
/// let options = ResetOptions {
///     generated_password_length: 16,
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct ResetOptions {
    /// bcrypt cost factor used to hash generated passwords.
    pub hash_cost_factor: u32,
    pub generated_password_length: usize,
    pub from_email: String,
    pub from_name: String,
    pub subject: String,
    /// Renders the email body. If [`None`], the built in template is used.
    pub email_template: Option<DynEmailTemplate>,
    /// Table holding the `id`, `email`, and `password` columns.
    pub directory_table: String,
    pub notification_api_base: String,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            hash_cost_factor: 10,
            generated_password_length: 10,
            from_email: "noreply@yourdomain.com".to_owned(),
            from_name: "Password Reset".to_owned(),
            subject: "Your Password Has Been Reset".to_owned(),
            email_template: None,
            directory_table: "users".to_owned(),
            notification_api_base: "https://api.mailgun.net".to_owned(),
        }
    }
}

impl ResetOptions {
    /// The sender of reset emails, in `Name <address>` form.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResetConfigInvalidity {
    MissingDirectoryEndpoint,
    MissingDirectoryCredential,
    MissingNotificationCredential,
    MissingNotificationDomain,
    /// The cost factor is outside the range bcrypt supports. The provided
    /// value is contained.
    HashCostFactor(u32),
    /// Generated passwords must contain at least one character.
    EmptyGeneratedPassword,
    /// Generated passwords may not be longer than bcrypt can hash. The
    /// configured length is contained.
    GeneratedPasswordTooLong(usize),
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Validate for ResetConfig {
    type Invalidity = ResetConfigInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let cost = self.options.hash_cost_factor;
        // Generated passwords are ASCII, so characters and bytes agree.
        let length = self.options.generated_password_length;

        ValidationContext::new()
            .invalidate_if(
                is_blank(&self.directory_endpoint),
                ResetConfigInvalidity::MissingDirectoryEndpoint,
            )
            .invalidate_if(
                is_blank(self.directory_credential.expose_secret()),
                ResetConfigInvalidity::MissingDirectoryCredential,
            )
            .invalidate_if(
                is_blank(self.notification_credential.expose_secret()),
                ResetConfigInvalidity::MissingNotificationCredential,
            )
            .invalidate_if(
                is_blank(&self.notification_domain),
                ResetConfigInvalidity::MissingNotificationDomain,
            )
            .invalidate_if(
                !(MIN_COST..=MAX_COST).contains(&cost),
                ResetConfigInvalidity::HashCostFactor(cost),
            )
            .invalidate_if(length == 0, ResetConfigInvalidity::EmptyGeneratedPassword)
            .invalidate_if(
                length > MAX_PASSWORD_BYTES,
                ResetConfigInvalidity::GeneratedPasswordTooLong(length),
            )
            .into()
    }
}
