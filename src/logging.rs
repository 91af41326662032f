use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PS_LOG";

/// Installs the stderr log subscriber. Stdout is reserved for the table.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
