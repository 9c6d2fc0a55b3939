//! Fixed-size worker pool that runs a batch of requests to completion.
mod driver;
mod plan;


pub use driver::{LoadOutcome, WorkerSummary, run_load};
pub use plan::{LoadPlan, MAX_RESULT_BUFFER};
