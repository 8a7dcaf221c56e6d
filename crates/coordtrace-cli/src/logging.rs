use crate::args::LogLevel;

/// Installs a `tracing_subscriber::fmt` subscriber writing to stderr, so
/// structured logs from the engine/resolver/ingestor never land in a piped
/// CSV or GraphML export on stdout.
pub fn init(level: LogLevel) {
    let filter = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
