use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::args::parsers::env_flag_enabled;

/// Installs the global `tracing` subscriber. Logs go to stderr so stdout only
/// carries the report.
pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var("VOLLEY_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let no_color = no_color
        || std::env::var("NO_COLOR")
            .ok()
            .is_some_and(|value| env_flag_enabled(&value));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
