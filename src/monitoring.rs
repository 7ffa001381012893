use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Logs go to stderr so stdout stays a clean
/// stream of trader outputs.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false);

    // A subscriber may already be set (tests, embedding hosts).
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
