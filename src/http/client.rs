use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Builds the client shared by every worker of a run.
///
/// Timeouts, redirects and pooling stay at reqwest defaults; only the
/// User-Agent is set.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client() -> AppResult<Client> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| {
            tracing::error!("Failed to build HTTP client: {}", err);
            AppError::http(HttpError::ClientBuild { source: err })
        })
}
