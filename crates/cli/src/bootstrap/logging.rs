use ferrous_ptr_domain::Config;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. Stdout is reserved for lookup results.
///
/// `RUST_LOG` takes precedence over the configured level, e.g.
///   RUST_LOG=ferrous_ptr_application=debug
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
