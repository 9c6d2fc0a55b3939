use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{LoadArgs, OutputFormat};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{HttpExecutor, RequestExecutor};
use crate::load::{LoadPlan, run_load};
use crate::report::{print_banner, print_report};

/// Fully validated inputs for one run.
#[derive(Debug)]
pub(crate) struct RunSettings {
    url: String,
    plan: LoadPlan,
    output_format: OutputFormat,
}

impl RunSettings {
    fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let Some(url) = args
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        else {
            tracing::error!("Missing URL (set --url or provide in config).");
            return Err(AppError::validation(ValidationError::MissingUrl));
        };

        let Some(requests) = args.requests else {
            tracing::error!("Missing request count (set --requests or provide in config).");
            return Err(AppError::validation(ValidationError::MissingRequests));
        };

        let plan = LoadPlan::new(requests, args.concurrency).map_err(|err| {
            tracing::error!("{}", err);
            AppError::validation(err)
        })?;

        Ok(Self {
            url: url.to_owned(),
            plan,
            output_format: args.output_format,
        })
    }
}

/// Parses the command line, validates it and runs the load test to completion.
///
/// # Errors
///
/// Returns an error for invalid configuration, an unusable HTTP client, or a
/// crashed worker. Per-request failures never surface here.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    let config_result = apply_config(&mut args, &matches);
    crate::logger::init_logging(args.verbose, args.no_color);
    match config_result {
        Ok(Some(path)) => tracing::debug!("Using config file {}", path.display()),
        Ok(None) => {}
        Err(err) => {
            tracing::error!("{}", err);
            return Err(err);
        }
    }

    let settings = RunSettings::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(settings))
}

fn parse_args() -> AppResult<(LoadArgs, ArgMatches)> {
    let matches = LoadArgs::command().get_matches();
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut LoadArgs, matches: &ArgMatches) -> AppResult<Option<PathBuf>> {
    let Some(path) = crate::config::resolve_config_path(args.config.as_deref()) else {
        return Ok(None);
    };
    let config = crate::config::load_config_file(&path)?;
    crate::config::apply_config(args, matches, &config)?;
    Ok(Some(path))
}

async fn run_async(settings: RunSettings) -> AppResult<()> {
    let executor: Arc<dyn RequestExecutor> = Arc::new(HttpExecutor::new()?);

    if settings.output_format == OutputFormat::Text {
        print_banner(
            &settings.url,
            settings.plan.requests(),
            settings.plan.concurrency(),
        );
    }

    let outcome = run_load(executor, &settings.url, settings.plan).await?;

    print_report(
        &outcome.report,
        settings.output_format,
        &settings.url,
        settings.plan.concurrency(),
    )
}
