use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the JSON log subscriber for a Carelink service binary.
///
/// Filtering follows `RUST_LOG`, falling back to `info` so a container
/// without the variable still emits startup and error lines. Later calls
/// are no-ops, which keeps eager test setup from panicking.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
