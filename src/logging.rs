use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Call once at startup. Respects `RUST_LOG`; defaults to info for this
/// crate with sqlx noise suppressed.
pub fn init_tracing() {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,sqlx=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    tracing_subscriber::registry().with(console_layer).init();
}
