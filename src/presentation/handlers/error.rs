use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ports::AudioStoreError;
use crate::application::services::{PipelineError, PipelineFailure};
use crate::domain::RequestValidationError;

use super::envelope::ErrorEnvelope;

pub const NOT_FOUND_MESSAGE: &str = "Audio file not found";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] RequestValidationError),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("Audio file not found")]
    NotFound,
    #[error("{0}")]
    Internal(String),
}

impl From<AudioStoreError> for ApiError {
    fn from(error: AudioStoreError) -> Self {
        match error {
            AudioStoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Pipeline(e) => match e.failure {
                PipelineFailure::Decode(_) => StatusCode::BAD_REQUEST,
                PipelineFailure::Model(_) | PipelineFailure::Write(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request rejected");
        }

        let body = match &self {
            ApiError::Pipeline(e) => ErrorEnvelope::from_pipeline(e),
            ApiError::NotFound => ErrorEnvelope::message(NOT_FOUND_MESSAGE),
            other => ErrorEnvelope::message(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
