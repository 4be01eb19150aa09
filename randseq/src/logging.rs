use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr and stay quiet unless `RUST_LOG` asks for more,
/// so stdout carries nothing but the sequence.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}
