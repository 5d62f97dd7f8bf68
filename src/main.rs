use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use vaani::application::services::{TranslationOrchestrator, WaveformNormalizer};
use vaani::infrastructure::audio::{RubatoResampler, default_decoder_chain};
use vaani::infrastructure::model::ModelFactory;
use vaani::infrastructure::observability::{TracingConfig, init_tracing};
use vaani::infrastructure::storage::LocalAudioStore;
use vaani::presentation::config::{Environment, Settings};
use vaani::presentation::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load_for(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
        settings.logging.filter.clone(),
    ));

    tracing::info!(
        provider = ?settings.model.provider,
        model_id = %settings.model.model_id,
        base_url = %settings.model.base_url,
        "Loading speech translation model"
    );
    let model = ModelFactory::create(
        settings.model.provider,
        &settings.model.base_url,
        &settings.model.model_id,
        &settings.model.precisions,
        settings.model.request_timeout_secs,
    )
    .await
    .context("Failed to load speech translation model")?;

    let decoder_chain = Arc::new(default_decoder_chain(settings.audio.ffmpeg_fallback));
    let normalizer = Arc::new(
        WaveformNormalizer::new(
            Arc::new(RubatoResampler),
            settings.audio.model_sample_rate,
            settings.audio.max_duration_secs,
        )
        .with_min_duration(settings.audio.min_duration_secs),
    );

    let audio_store = Arc::new(
        LocalAudioStore::new(PathBuf::from(&settings.storage.output_dir))
            .context("Failed to prepare audio output directory")?,
    );
    tracing::info!(output_dir = %audio_store.root().display(), "Audio store ready");

    let orchestrator = Arc::new(TranslationOrchestrator::new(
        decoder_chain,
        normalizer,
        model,
        audio_store.clone(),
    ));

    let state = AppState {
        orchestrator,
        audio_store,
    };

    let router = create_router(state, &settings.cors.origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
