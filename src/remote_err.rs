use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// A non-success response from one of the hosted providers.
#[derive(Debug, Error)]
#[error("{provider} responded with {status}: {message}")]
pub struct RemoteError {
    pub provider: &'static str,
    pub status: StatusCode,
    pub message: String,
}

/// Both PostgREST and Mailgun describe failures with a `message` field.
#[derive(Deserialize)]
struct JsonError {
    message: String,
}

/// Pass a successful response through, or convert a failed one into a
/// [`RemoteError`].
///
/// # Arguments
///
/// * `provider` - Name of the provider used in the error message.
/// * `response` - The response to inspect.
pub async fn ensure_success(
    provider: &'static str,
    response: Response,
) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(RemoteError {
        provider,
        status,
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<JsonError>(body) {
        Ok(json_error) => json_error.message,
        Err(_) if body.trim().is_empty() => "no response body".to_owned(),
        Err(_) => body.trim().to_owned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::recording_server::RecordingServer;

    #[test]
    fn error_message_from_json() {
        let body = r#"{"message": "Domain not found: example.com"}"#;

        assert_eq!("Domain not found: example.com", error_message(body));
    }

    #[test]
    fn error_message_from_text() {
        assert_eq!("Forbidden", error_message("Forbidden\n"));
    }

    #[test]
    fn error_message_from_empty_body() {
        assert_eq!("no response body", error_message("  "));
    }

    #[test]
    fn display_includes_provider_and_status() {
        let error = RemoteError {
            provider: "Mailgun",
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid private key".to_owned(),
        };

        assert_eq!(
            "Mailgun responded with 401 Unauthorized: Invalid private key",
            error.to_string()
        );
    }

    #[tokio::test]
    async fn ensure_success_passes_success_through() {
        let server = RecordingServer::start(StatusCode::OK, "[]");
        let response = reqwest::get(&server.url).await.expect("server should answer");

        let response = ensure_success("Supabase", response)
            .await
            .expect("success should pass through");

        assert_eq!("[]", response.text().await.expect("body should be text"));
    }

    #[tokio::test]
    async fn ensure_success_converts_error_response() {
        let server = RecordingServer::start(
            StatusCode::UNAUTHORIZED,
            r#"{"message": "Invalid private key"}"#,
        );
        let response = reqwest::get(&server.url).await.expect("server should answer");

        let error = ensure_success("Mailgun", response)
            .await
            .expect_err("error status should fail");

        assert_eq!("Mailgun", error.provider);
        assert_eq!(StatusCode::UNAUTHORIZED, error.status);
        assert_eq!("Invalid private key", error.message);
    }
}
