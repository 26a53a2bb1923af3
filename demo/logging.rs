use tracing_subscriber::EnvFilter;

/// Installs a compact stderr subscriber. `RUST_LOG` picks the level
/// (default `warn`); `RUST_LOG=debug` shows every training epoch.
pub fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
}
