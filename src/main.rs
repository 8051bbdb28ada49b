//! Innoscope server entry point.
//!
//! Loads configuration, builds the provider registry, spawns the analysis
//! worker, and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use innoscope::adapters::ai::build_registry;
use innoscope::adapters::http::problems::{problems_router, ProblemsAppState};
use innoscope::adapters::queue::InMemoryJobQueue;
use innoscope::adapters::storage::InMemoryProblemStore;
use innoscope::application::{AnalysisDispatcher, AnalysisExecutor};
use innoscope::config::AppConfig;
use innoscope::ports::ProblemStore;

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

    let registry = Arc::new(build_registry(&config.ai));
    if registry.is_empty() {
        warn!("No AI providers available! Please configure API keys.");
    } else {
        info!(
            providers = ?registry.available_providers(),
            "Provider registry initialized"
        );
    }

    let store: Arc<dyn ProblemStore> = Arc::new(InMemoryProblemStore::new());
    let (queue, consumer) = InMemoryJobQueue::new();

    let dispatcher = Arc::new(AnalysisDispatcher::new(
        store.clone(),
        Arc::new(queue),
        registry.clone(),
    ));
    let executor =
        AnalysisExecutor::new(store.clone(), registry.clone(), config.ai.timeout());

    // The worker owns the consumer half of the queue and runs until the
    // producer side drops or the store fails.
    let worker = tokio::spawn(async move {
        if let Err(err) = executor.run_worker(Box::new(consumer)).await {
            error!(error = %err, "Analysis worker stopped on storage failure");
        }
    });

    let cors = build_cors(&config);
    let state = ProblemsAppState::new(store, dispatcher, registry);
    let app = problems_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, "Starting Innoscope server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    worker.abort();
    Ok(())
}

fn build_cors(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
