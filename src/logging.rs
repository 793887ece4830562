// src/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber for a binary. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,csvsql=debug")),
        )
        .with_test_writer()
        .finish();
    // another test may have installed it already
    let _ = tracing::subscriber::set_global_default(subscriber);
}
