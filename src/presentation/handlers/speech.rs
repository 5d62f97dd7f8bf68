use axum::Json;
use axum::extract::{Multipart, State};

use crate::domain::{
    LanguageCode, OutputModality, RequestValidationError, TranslationInput, TranslationRequest,
};
use crate::presentation::state::AppState;

use super::audio_form::read_audio_form;
use super::envelope::TranslationEnvelope;
use super::error::ApiError;

const TRANSCRIBE_FILE_FIELD: &str = "file";
const SPEECH_FILE_FIELD: &str = "audio";

#[tracing::instrument(skip(state, multipart))]
pub async fn speech_to_text_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranslationEnvelope>, ApiError> {
    let form = read_audio_form(multipart, TRANSCRIBE_FILE_FIELD).await?;
    let audio = form
        .audio
        .filter(|a| !a.is_empty())
        .ok_or(RequestValidationError::MissingAudio)?;

    // transcription only: the target is the spoken language
    let src_lang = resolve_language(form.src_lang.as_deref())?;
    let request = TranslationRequest::new(
        TranslationInput::Audio(audio),
        src_lang.clone(),
        src_lang,
        OutputModality::Text,
    )?;

    let result = state.orchestrator.run(request).await?;
    let envelope = TranslationEnvelope::build(result);
    Ok(Json(TranslationEnvelope {
        transcribed_text: envelope.transcribed_text,
        warnings: envelope.warnings,
        ..TranslationEnvelope::default()
    }))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn speech_to_speech_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranslationEnvelope>, ApiError> {
    let form = read_audio_form(multipart, SPEECH_FILE_FIELD).await?;
    let audio = form
        .audio
        .filter(|a| !a.is_empty())
        .ok_or(RequestValidationError::MissingAudio)?;

    let src_lang = resolve_language(form.src_lang.as_deref())?;
    let target_lang = resolve_language(form.target_lang.as_deref())?;
    let request = TranslationRequest::new(
        TranslationInput::Audio(audio),
        src_lang,
        target_lang,
        OutputModality::Speech,
    )?;

    let result = state.orchestrator.run(request).await?;
    Ok(Json(TranslationEnvelope::build(result)))
}

/// Blank or missing form values fall back to the default source language.
fn resolve_language(code: Option<&str>) -> Result<LanguageCode, RequestValidationError> {
    match code.map(str::trim) {
        Some(code) if !code.is_empty() => {
            LanguageCode::parse(code).map_err(RequestValidationError::InvalidLanguage)
        }
        _ => Ok(LanguageCode::default_source()),
    }
}
