//! ProductivePro backend that serves the frontend and the JSON API

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use productivepro::api::{create_api_router, AppState};
use productivepro::config::Config;
use productivepro::logging::{init_logging, log_startup};
use productivepro::services::{
    InsightsAggregator, SessionClock, SessionStore, StatsStore, SystemTimeProvider, TimeProvider,
};
use productivepro::storage::MemoryStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_logging(&config);
    log_startup();
    config.log_config();

    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider::new());

    let stats = Arc::new(StatsStore::new());
    let insights = Arc::new(InsightsAggregator::new(
        stats,
        time_provider.clone(),
        config.rollover_timezone(),
    ));
    let sessions = Arc::new(SessionClock::new(
        Arc::new(SessionStore::new(config.session_history_limit)),
        insights.clone(),
        time_provider.clone(),
    ));
    let storage = Arc::new(MemoryStorage::new(time_provider));

    let state = AppState {
        sessions,
        insights,
        storage,
    };

    let index_file = config.public_dir.join("index.html");
    let app = Router::new()
        .nest("/api", create_api_router(state))
        // Unknown paths fall through to the frontend router
        .fallback_service(ServeDir::new(&config.public_dir).fallback(ServeFile::new(index_file)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)),
        );

    info!("ProductivePro listening on {}", config.server_url());

    let listener = TcpListener::bind(config.bind_address()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the CORS layer from the configured origins
///
/// An empty origin list allows any origin, which matches the development
/// setup where the frontend is served from the same process anyway.
fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-user-id"),
        ]);

    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
