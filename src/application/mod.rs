pub mod config;
pub mod database;
pub mod error;
pub mod response;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for embedding binaries and tests.
///
/// Respects `RUST_LOG`; falls back to the configured log level for this
/// crate only. Calling it twice is a no-op (the second `init` would panic,
/// so we use `try_init`).
pub fn init_tracing() {
    let fallback = format!("config_matrix={}", config::CONFIG.log_level);
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&fallback)),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
