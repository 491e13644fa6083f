use anyhow::bail;

use crate::identities::{config::ResetConfig, services::PasswordResetService};

pub struct ResetOpts {
    pub email: String,
    pub reset_config: ResetConfig,
}

/// Reset a single account's password and print the outcome as JSON.
pub async fn run(opts: ResetOpts) -> anyhow::Result<()> {
    let service = PasswordResetService::new(opts.reset_config)?;

    let result = service.reset_password_by_email(&opts.email).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        bail!("Password reset failed: {}", result.message);
    }

    Ok(())
}
