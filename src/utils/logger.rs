use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins when set. Otherwise the HTTP client stack stays at warn
/// even in verbose mode, so request-level noise does not drown the refresh log.
fn ladder_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let ours = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!(
            "warn,cf_ladder={},reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn",
            ours
        ))
    })
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(ladder_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for piping into a log collector.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(ladder_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false),
        )
        .init();
}
