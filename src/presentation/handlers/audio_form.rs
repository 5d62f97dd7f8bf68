use axum::extract::Multipart;

use super::error::ApiError;

/// Fields of an audio upload form.
#[derive(Debug, Default)]
pub struct AudioForm {
    pub audio: Option<Vec<u8>>,
    pub src_lang: Option<String>,
    pub target_lang: Option<String>,
}

pub async fn read_audio_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<AudioForm, ApiError> {
    let mut form = AudioForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == file_field {
            let filename = field.file_name().unwrap_or("unknown").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
            tracing::debug!(filename = %filename, bytes = data.len(), "Audio upload received");
            form.audio = Some(data.to_vec());
            continue;
        }

        match name.as_str() {
            "src_lang" | "target_lang" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read field '{}': {}", name, e))
                })?;
                if name == "src_lang" {
                    form.src_lang = Some(value);
                } else {
                    form.target_lang = Some(value);
                }
            }
            other => tracing::debug!(field = other, "Ignoring multipart field"),
        }
    }

    Ok(form)
}
