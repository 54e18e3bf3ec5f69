use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error body returned for every non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// HTTP-facing error categories.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Startup and shutdown failures, mapped to process exit codes.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build provider client: {0}")]
    Provider(#[from] ferrochart_core::HttpError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Provider(_) => 2,
            Self::Bind { .. } => 3,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_carry_status_and_message() {
        let not_found = ApiError::NotFound(String::from("No data found for symbol X.NS"));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "No data found for symbol X.NS");

        let wrong_method = ApiError::MethodNotAllowed(String::from("Method Not Allowed"));
        assert_eq!(wrong_method.status(), StatusCode::METHOD_NOT_ALLOWED);

        let internal = ApiError::Internal(String::from("boom"));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_is_detail_object() {
        let json = serde_json::to_string(&ErrorBody {
            detail: String::from("boom"),
        })
        .expect("serialize");
        assert_eq!(json, r#"{"detail":"boom"}"#);
    }
}
