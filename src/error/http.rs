use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
    #[error("{count} worker(s) panicked before finishing their requests.")]
    WorkerPanicked { count: usize },
}
