use std::net::SocketAddr;

use axum::{extract::FromRef, Router};
use tracing::info;

use crate::identities::{config::ResetConfig, services::PasswordResetService};

pub struct Options {
    pub bind_address: SocketAddr,
    pub reset_config: ResetConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub password_resets: PasswordResetService,
}

pub async fn serve(opts: Options) -> anyhow::Result<()> {
    let password_resets = PasswordResetService::new(opts.reset_config)?;

    let state = AppState { password_resets };

    let app = Router::new()
        .merge(crate::identities::http::routes())
        .with_state(state);

    info!(address = %opts.bind_address, "Listening for password reset requests.");

    axum::Server::bind(&opts.bind_address)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

impl FromRef<AppState> for PasswordResetService {
    fn from_ref(state: &AppState) -> Self {
        state.password_resets.clone()
    }
}
