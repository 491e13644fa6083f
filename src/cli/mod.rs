use std::{borrow::Cow, net::SocketAddr};

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    identities::config::{ResetConfig, ResetOptions},
    server,
};

mod reset;

#[derive(Parser)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// DSN to tell Sentry where to send events.
    ///
    /// If provided, errors will be sent to Sentry.
    #[clap(long = "sentry-dsn", env = "SENTRY_DSN")]
    sentry_dsn: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the password of a single account and exit.
    Reset(ResetOpts),
    /// Serve password reset requests over HTTP.
    Serve(ServeOpts),
}

#[derive(Args)]
struct ResetOpts {
    /// Email address of the account to reset.
    #[clap(long = "email")]
    email: String,

    #[clap(flatten)]
    config: ConfigOpts,
}

#[derive(Args)]
struct ServeOpts {
    /// Address to listen on.
    #[clap(
        long = "bind-address",
        default_value = "0.0.0.0:8000",
        env = "BIND_ADDRESS"
    )]
    bind_address: SocketAddr,

    #[clap(flatten)]
    config: ConfigOpts,
}

#[derive(Args)]
struct ConfigOpts {
    /// URL of the Supabase project.
    #[clap(long = "supabase-url", env = "SUPABASE_URL")]
    supabase_url: String,

    /// Service-role key for the Supabase project.
    ///
    /// This key bypasses row level security. Never expose it to clients.
    #[clap(long = "supabase-service-role-key", env = "SUPABASE_SERVICE_ROLE_KEY")]
    supabase_service_role_key: String,

    /// Table storing user accounts.
    #[clap(
        long = "supabase-users-table",
        default_value = "users",
        env = "SUPABASE_USERS_TABLE"
    )]
    supabase_users_table: String,

    /// Private API key for Mailgun.
    #[clap(long = "mailgun-key", env = "MAILGUN_API_KEY")]
    mailgun_key: String,

    /// Mailgun sending domain.
    #[clap(long = "mailgun-domain", env = "MAILGUN_DOMAIN")]
    mailgun_domain: String,

    /// Base URL of the Mailgun API.
    ///
    /// Accounts in the EU region use https://api.eu.mailgun.net.
    #[clap(
        long = "mailgun-api-base",
        default_value = "https://api.mailgun.net",
        env = "MAILGUN_API_BASE"
    )]
    mailgun_api_base: String,

    /// bcrypt cost factor for new password hashes.
    #[clap(
        long = "password-hash-cost",
        default_value = "10",
        env = "PASSWORD_HASH_COST"
    )]
    password_hash_cost: u32,

    /// Number of characters in generated passwords.
    #[clap(
        long = "generated-password-length",
        default_value = "10",
        env = "GENERATED_PASSWORD_LENGTH"
    )]
    generated_password_length: usize,

    /// Address to send emails from.
    #[clap(
        long = "email-from-address",
        default_value = "noreply@yourdomain.com",
        env = "EMAIL_FROM_ADDRESS"
    )]
    email_from_address: String,

    /// Display name to send emails from.
    #[clap(
        long = "email-from-name",
        default_value = "Password Reset",
        env = "EMAIL_FROM_NAME"
    )]
    email_from_name: String,

    /// Subject of password reset emails.
    #[clap(
        long = "email-subject",
        default_value = "Your Password Has Been Reset",
        env = "EMAIL_SUBJECT"
    )]
    email_subject: String,
}

impl From<ConfigOpts> for ResetConfig {
    fn from(opts: ConfigOpts) -> Self {
        Self {
            directory_endpoint: opts.supabase_url,
            directory_credential: SecretString::new(opts.supabase_service_role_key),
            notification_credential: SecretString::new(opts.mailgun_key),
            notification_domain: opts.mailgun_domain,
            options: ResetOptions {
                hash_cost_factor: opts.password_hash_cost,
                generated_password_length: opts.generated_password_length,
                from_email: opts.email_from_address,
                from_name: opts.email_from_name,
                subject: opts.email_subject,
                email_template: None,
                directory_table: opts.supabase_users_table,
                notification_api_base: opts.mailgun_api_base,
            },
        }
    }
}

impl From<ServeOpts> for server::Options {
    fn from(opts: ServeOpts) -> Self {
        Self {
            bind_address: opts.bind_address,
            reset_config: opts.config.into(),
        }
    }
}

impl From<ResetOpts> for reset::ResetOpts {
    fn from(opts: ResetOpts) -> Self {
        Self {
            email: opts.email,
            reset_config: opts.config.into(),
        }
    }
}

pub async fn run_with_sys_args() -> anyhow::Result<()> {
    use tracing_subscriber::prelude::*;

    let cli = Cli::parse();

    let sentry_config = cli.sentry_dsn.map(|dsn| {
        debug!("Enabled sentry.");

        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: option_env!("GIT_SHA")
                    .map(Cow::from)
                    .or_else(|| sentry::release_name!()),
                ..Default::default()
            },
        ))
    });

    let sentry_tracing_layer = if sentry_config.is_some() {
        Some(sentry_tracing::layer())
    } else {
        None
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(sentry_tracing_layer)
        .init();

    match cli.command {
        Commands::Reset(opts) => reset::run(opts.into()).await,
        Commands::Serve(opts) => server::serve(opts.into()).await,
    }
}
