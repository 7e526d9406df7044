use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Logs go to stderr so rendered tables on stdout stay clean. `RUST_LOG`
/// takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let directive = if verbose { "fxr=debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
