//! Authentication errors.
//!
//! The taxonomy is deliberately small and the client-facing messages
//! deliberately vague: credential failures never reveal whether the account
//! exists, and token failures never reveal why verification failed. Full
//! detail goes to the server log instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Authentication and authorization failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, wrong password, or a role outside the requested track.
    /// One message for all three.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, expired, or signature-mismatched session token.
    #[error("not authenticated")]
    TokenInvalid,

    /// Request body failed structural validation. The detail is safe to
    /// expose; it never depends on what the store contains.
    #[error("{0}")]
    SchemaInvalid(String),

    /// The credential store could not be reached.
    #[error("credential store unavailable")]
    Upstream(#[source] anyhow::Error),

    /// States that should never be reached (e.g. token encoding failure).
    #[error("internal auth error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct AuthErrorResponse {
    pub message: String,
    pub code: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AuthError::TokenInvalid => {
                (StatusCode::UNAUTHORIZED, "token_invalid", self.to_string())
            }
            AuthError::SchemaInvalid(_) => {
                (StatusCode::BAD_REQUEST, "schema_invalid", self.to_string())
            }
            AuthError::Upstream(source) => {
                tracing::error!(error = ?source, "credential store unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_unavailable",
                    "service temporarily unavailable".to_string(),
                )
            }
            AuthError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal auth error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(AuthErrorResponse {
            message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failure_message_is_generic() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
    }

    #[test]
    fn test_token_failure_message_carries_no_detail() {
        assert_eq!(AuthError::TokenInvalid.to_string(), "not authenticated");
    }

    #[test]
    fn test_schema_detail_is_exposed() {
        let err = AuthError::SchemaInvalid("email must not be empty".to_string());
        assert_eq!(err.to_string(), "email must not be empty");
    }
}
