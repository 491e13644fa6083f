use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use semval::ValidatedFrom;
use tracing::error;

use crate::{
    http_err::{ApiResponse, InternalServerError},
    server::AppState,
};

use super::{domain::email::EmailAddress, services::PasswordResetService};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new().route("/password-resets", post(create_password_reset))
}

pub enum CreatePasswordResetResponse {
    Accepted(reps::PasswordResetAccepted),
    BadRequest(reps::PasswordResetRequestError),
}

impl IntoResponse for CreatePasswordResetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(rep) => (StatusCode::ACCEPTED, Json(rep)).into_response(),
            Self::BadRequest(rep) => (StatusCode::BAD_REQUEST, Json(rep)).into_response(),
        }
    }
}

async fn create_password_reset(
    State(password_resets): State<PasswordResetService>,
    Json(reset_request): Json<reps::PasswordResetRequest>,
) -> ApiResponse<CreatePasswordResetResponse> {
    let email = match EmailAddress::validated_from(reset_request.email.as_str()) {
        Ok(email) => email,
        Err((_, context)) => {
            return Ok(CreatePasswordResetResponse::BadRequest(context.into()));
        }
    };

    let result = password_resets.reset_password_by_email(email.as_str()).await;

    if result.success || result.is_user_not_found() {
        Ok(CreatePasswordResetResponse::Accepted(Default::default()))
    } else {
        error!(reason = %result.message, detail = ?result.error, "Password reset failed.");

        Err(InternalServerError::default())
    }
}
