use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::utils::error::SieveError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for SieveError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            SieveError::Config { message } => {
                (StatusCode::BAD_REQUEST, message.clone(), None)
            }
            SieveError::InvalidConfigValue { .. } => {
                (StatusCode::BAD_REQUEST, self.to_string(), None)
            }
            SieveError::Upstream(e) => {
                tracing::error!("Upstream request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to fetch upstream feed".to_string(),
                    Some(e.to_string()),
                )
            }
            SieveError::UpstreamStatus { .. } => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to fetch upstream feed".to_string(),
                    Some(self.to_string()),
                )
            }
            SieveError::Parse { message } => {
                tracing::error!("Feed parse error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to parse upstream feed".to_string(),
                    Some(message.clone()),
                )
            }
            other => {
                tracing::error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                    Some(other.to_string()),
                )
            }
        };

        let body = ErrorResponse { error, details };
        (status, Json(body)).into_response()
    }
}
