use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures of the credential gate
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication token is required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Failures reading the odds snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Odds data file not available: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Odds data file {} is malformed: {reason}", path.display())]
    MalformedSnapshot { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Errors returned by HTTP handlers, rendered as `{"message": ...}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
            detail: None,
        }
    }

    /// Internal error carrying the cause chain; the chain is only rendered when `expose` is set
    pub fn internal_with(
        message: impl Into<String>,
        cause: &(dyn std::error::Error + 'static),
        expose: bool,
    ) -> Self {
        ApiError::Internal {
            message: message.into(),
            detail: expose.then(|| error_chain(cause)),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::MalformedHash(_) | AuthError::Signing(_) => {
                tracing::error!(error = %err, "authentication failure");
                ApiError::internal("Server error during authentication")
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Internal { message, detail } => ErrorBody { message, detail },
            other => ErrorBody {
                message: other.to_string(),
                detail: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_errors_do_not_leak_field() {
        let err: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_detail_hidden_unless_exposed() {
        let cause = SnapshotError::SourceUnavailable {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        match ApiError::internal_with("Error fetching odds data", &cause, false) {
            ApiError::Internal { detail, .. } => assert!(detail.is_none()),
            other => panic!("unexpected {other:?}"),
        }
        match ApiError::internal_with("Error fetching odds data", &cause, true) {
            ApiError::Internal { detail, .. } => {
                let detail = detail.unwrap();
                assert!(detail.contains("missing.json"));
                assert!(detail.contains("no such file"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
