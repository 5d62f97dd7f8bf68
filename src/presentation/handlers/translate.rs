use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use crate::domain::{OutputModality, TranslationRequest};
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::state::AppState;

use super::envelope::TranslationEnvelope;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TextRequestBody {
    pub text: Option<String>,
    pub target_lang: Option<String>,
    pub src_lang: Option<String>,
}

pub(crate) fn text_request(
    body: Result<Json<TextRequestBody>, JsonRejection>,
    output_modality: OutputModality,
) -> Result<TranslationRequest, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    if let Some(text) = &body.text {
        tracing::debug!(text = %sanitize_for_log(text), "Text request received");
    }

    let request = TranslationRequest::from_parts(
        body.text,
        None,
        body.src_lang.as_deref(),
        body.target_lang.as_deref(),
        output_modality,
    )?;
    Ok(request)
}

#[tracing::instrument(skip(state, body))]
pub async fn translate_handler(
    State(state): State<AppState>,
    body: Result<Json<TextRequestBody>, JsonRejection>,
) -> Result<Json<TranslationEnvelope>, ApiError> {
    let request = text_request(body, OutputModality::Text)?;

    let result = state.orchestrator.run(request).await?;
    let final_text = result.final_text.clone();
    let envelope = TranslationEnvelope::build(result);

    // same-language requests skip the model but still answer with the text
    Ok(Json(TranslationEnvelope {
        translated_text: envelope.translated_text.or(final_text),
        warnings: envelope.warnings,
        ..TranslationEnvelope::default()
    }))
}

#[tracing::instrument(skip(state, body))]
pub async fn text_to_speech_handler(
    State(state): State<AppState>,
    body: Result<Json<TextRequestBody>, JsonRejection>,
) -> Result<Json<TranslationEnvelope>, ApiError> {
    let request = text_request(body, OutputModality::Speech)?;

    let result = state.orchestrator.run(request).await?;
    Ok(Json(TranslationEnvelope::build(result)))
}
