use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "rockday=info";

/// Initialize tracing. Logs go to stderr so stdout only carries the run
/// summary.
///
/// `RUST_LOG` overrides the default `rockday=info` filter if set.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
