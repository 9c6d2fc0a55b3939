use clap::Parser;

use super::parsers::parse_positive_usize;
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fire a fixed batch of concurrent HTTP GET requests at a URL and report the status-code distribution."
)]
pub struct LoadArgs {
    /// Target URL for the load test
    #[arg(long, short)]
    pub url: Option<String>,

    /// Total number of GET requests to issue
    #[arg(long = "requests", short = 'n', value_parser = parse_positive_usize)]
    pub requests: Option<PositiveUsize>,

    /// Number of concurrent workers (a remainder worker is added when requests do not divide evenly)
    #[arg(
        long = "concurrency",
        short = 'c',
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Report format written to stdout
    #[arg(long = "output-format", short = 'o', default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Enable verbose logging (sets log level to debug unless overridden by VOLLEY_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug")]
    pub verbose: bool,

    /// Disable colored log output (also honoured via NO_COLOR)
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./volley.toml or ./volley.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
