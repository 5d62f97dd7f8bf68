use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::domain::AudioFileName;
use crate::presentation::state::AppState;

use super::error::ApiError;

#[tracing::instrument(skip(state))]
pub async fn latest_audio_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    serve(&state, &AudioFileName::latest()).await
}

#[tracing::instrument(skip(state))]
pub async fn audio_file_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let name = AudioFileName::parse(&filename).ok_or(ApiError::NotFound)?;
    serve(&state, &name).await
}

async fn serve(state: &AppState, name: &AudioFileName) -> Result<Response, ApiError> {
    let bytes = state.audio_store.fetch(name).await?;
    tracing::debug!(file = %name, bytes = bytes.len(), "Serving audio file");

    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        bytes,
    )
        .into_response())
}
