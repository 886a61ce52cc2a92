//! Echoes Engine - Main entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use echoes_engine::infrastructure::{
    clock::SystemClock,
    generator::LlmAdventureGenerator,
    nominatim::NominatimClient,
    ollama::OllamaClient,
    persistence::{InMemoryAdventureStore, SqliteAdventureStore},
    ports::{AdventureStore, ClockPort},
};
use echoes_engine::{api, App, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echoes_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Echoes Engine");

    let config = AppConfig::from_env();
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let store: Arc<dyn AdventureStore> = if config.uses_in_memory_store() {
        tracing::warn!("ECHOES_DB is :memory:, progress will not survive a restart");
        Arc::new(InMemoryAdventureStore::new())
    } else {
        tracing::info!(path = %config.database_path, "Opening adventure database");
        Arc::new(SqliteAdventureStore::new(&config.database_path, clock.clone()).await?)
    };

    // Create infrastructure clients
    tracing::info!(
        url = %config.ollama_base_url,
        model = %config.ollama_model,
        "LLM client configured"
    );
    let llm = Arc::new(OllamaClient::new(&config.ollama_base_url, &config.ollama_model));
    let generator = Arc::new(LlmAdventureGenerator::new(llm));
    let geocoder = Arc::new(NominatimClient::new(&config.nominatim_url));

    let app = Arc::new(App::new(
        store,
        generator,
        geocoder,
        clock,
        config.default_language.clone(),
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
