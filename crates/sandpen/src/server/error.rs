use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sandpen_core::{GenerateError, ImportError};
use sandpen_format::FormatError;
use serde_json::json;

/// Transient, user-facing failures of an API call; rendered as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("{0}")]
    BadRequest(String),
    #[error("No document is loaded")]
    NoDocument,
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Generate(GenerateError::EmptyPrompt) | Self::BadRequest(_) | Self::Import(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Generate(GenerateError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Generate(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Format(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoDocument => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
