use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem for a binary.
///
/// Priority: RUST_LOG env var > `debug_flag` > `default_level`.
pub fn init(debug_flag: bool, default_level: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(default_level)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialised");
}
