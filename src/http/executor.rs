use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::Instant;

use crate::error::AppResult;

use super::client::build_client;

/// Status recorded for attempts that failed before any response arrived.
pub const NO_RESPONSE_STATUS: u16 = 0;

/// Outcome of one GET attempt. Produced once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    pub status_code: u16,
    pub duration: Duration,
    pub error: Option<String>,
}

impl RequestResult {
    #[must_use]
    pub const fn response(status_code: u16, duration: Duration) -> Self {
        Self {
            status_code,
            duration,
            error: None,
        }
    }

    #[must_use]
    pub const fn failure(reason: String, duration: Duration) -> Self {
        Self {
            status_code: NO_RESPONSE_STATUS,
            duration,
            error: Some(reason),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Issues a single request and reports what happened. Implementations absorb
/// every transport failure into the returned [`RequestResult`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, url: &str) -> RequestResult;
}

#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Creates an executor backed by a fresh client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new() -> AppResult<Self> {
        Ok(Self::with_client(build_client()?))
    }

    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, url: &str) -> RequestResult {
        let start = Instant::now();
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => return RequestResult::failure(describe_error(&err), start.elapsed()),
        };

        let status = response.status().as_u16();
        match drain_response_body(response).await {
            Ok(()) => RequestResult::response(status, start.elapsed()),
            Err(err) => RequestResult::failure(
                format!("Failed to read response body: {}", describe_error(&err)),
                start.elapsed(),
            ),
        }
    }
}

// Reading to the end hands the connection back to the pool.
async fn drain_response_body(response: reqwest::Response) -> Result<(), reqwest::Error> {
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        chunk?;
    }
    Ok(())
}

/// Flattens the error source chain so DNS and connect failures stay readable.
fn describe_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message = format!("{}: {}", message, cause_text);
        }
        source = cause.source();
    }
    message
}
