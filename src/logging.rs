//! Logging configuration for ProductivePro
//!
//! Structured logging setup with appropriate levels and formatting.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::config::Config;

/// Initialize the application logging system
pub fn init_logging(config: &Config) {
    let default_filter = format!(
        "productivepro={},tower_http=info,axum::rejection=trace",
        config.log_level
    );

    // RUST_LOG wins over the configured level
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = Registry::default().with(env_filter);

    if config.log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(true),
            )
            .init();
    }

    tracing::info!("Logging system initialized");
}

/// Log application startup
pub fn log_startup() {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git_commit = option_env!("GIT_COMMIT").unwrap_or("unknown"),
        "ProductivePro starting up"
    );
}
