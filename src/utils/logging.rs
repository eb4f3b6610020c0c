// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the tracing subscriber for the analysis run.
/// `RUST_LOG` always wins; otherwise the level is "info", or "debug" when the
/// run was started with `--debug` so section and strategy decisions are visible.
pub fn setup_logging(debug: bool) {
    let default_level = if debug { "lattes_profiler=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("Logging setup complete (default level: {}).", default_level);
}
