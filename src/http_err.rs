use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
pub struct InternalServerError {
    pub message: String,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            message: "Internal server error.".to_string(),
        }
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

impl From<anyhow::Error> for InternalServerError {
    fn from(error: anyhow::Error) -> Self {
        error!(?error, "Received error.");

        Default::default()
    }
}

pub type ApiResponse<T> = Result<T, InternalServerError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_anyhow_hides_detail() {
        let error = InternalServerError::from(anyhow::anyhow!("connection refused"));

        assert_eq!("Internal server error.", error.message);
    }

    #[test]
    fn into_response_status() {
        let response = InternalServerError::default().into_response();

        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
    }
}
