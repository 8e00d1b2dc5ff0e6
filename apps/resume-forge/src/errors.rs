use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Proxy-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Upstream webhook returned {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Upstream {
                status,
                status_text,
            } => {
                tracing::error!("Webhook request failed: {status} {status_text}");
                (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    json!({
                        "error": "Failed to generate resume",
                        "status": status,
                        "statusText": status_text
                    }),
                )
            }
            AppError::InvalidJson(_) | AppError::Transport(_) => {
                tracing::error!("Error in generate-resume proxy: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "message": self.to_string()
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
