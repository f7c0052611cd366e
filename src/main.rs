//! DigitalMe service binary.
//!
//! Loads configuration from the environment, wires the adapters to the
//! application handlers, and serves the profile API over HTTP.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use digitalme::adapters::ai::{GeminiConfig, GeminiProvider, MockAiProvider};
use digitalme::adapters::analyzer::LlmStyleAnalyzer;
use digitalme::adapters::http::{profile_routes, ProfileHandlers};
use digitalme::adapters::rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
use digitalme::adapters::storage::{FileProfileStore, InMemoryProfileStore};
use digitalme::application::handlers::{
    GetProfileHandler, MergeProfileHandler, RefineProfileHandler, ResetProfileHandler,
};
use digitalme::config::{AiBackend, AppConfig, StorageBackend, ValidationError};
use digitalme::ports::{AiProvider, ProfileStore, RateLimiter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let provider: Arc<dyn AiProvider> = match config.ai.backend {
        AiBackend::Gemini => {
            let api_key = config
                .ai
                .gemini_api_key
                .clone()
                .ok_or(ValidationError::MissingApiKey)?;
            let gemini = GeminiConfig::new(api_key)
                .with_model(config.ai.model.clone())
                .with_timeout(config.ai.timeout());
            Arc::new(GeminiProvider::new(gemini)?)
        }
        AiBackend::Mock => {
            tracing::warn!("using mock AI backend, analysis results are canned");
            Arc::new(MockAiProvider::new())
        }
    };

    let analyzer = Arc::new(
        LlmStyleAnalyzer::new(Arc::clone(&provider)).with_chunk_words(config.ai.chunk_words),
    );

    let store: Arc<dyn ProfileStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileProfileStore::new(config.storage.dir.clone())),
        StorageBackend::Memory => {
            tracing::warn!("using in-memory profile store, profiles are lost on restart");
            Arc::new(InMemoryProfileStore::new())
        }
    };

    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
        requests_per_window: config.limits.requests_per_window,
        window_secs: config.limits.window_secs as u32,
    }));

    let handlers = ProfileHandlers::new(
        Arc::new(MergeProfileHandler::new(
            Arc::clone(&store),
            Arc::clone(&rate_limiter),
        )),
        Arc::new(RefineProfileHandler::new(
            Arc::clone(&store),
            analyzer,
            Arc::clone(&rate_limiter),
        )),
        Arc::new(GetProfileHandler::new(Arc::clone(&store))),
        Arc::new(ResetProfileHandler::new(Arc::clone(&store))),
    );

    let app = profile_routes(
        handlers,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
