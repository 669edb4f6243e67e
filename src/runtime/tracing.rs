/// Initializes the tracing/logging infrastructure for the application.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG` environment variable
/// - **Compact formatting**: Spans are shown inline (e.g. `barber:serve_next:`)
///
/// Falls back to `info` when `RUST_LOG` is unset, so the shop events are
/// visible by default.
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - Shop events and actor lifecycle
/// - `RUST_LOG=debug` - Admission decisions and counter changes
/// - `RUST_LOG=sleeping_barber::shop=debug` - Debug only for the monitor
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
