//! Single-request execution against the target URL.
mod client;
mod executor;


pub use client::build_client;
pub use executor::{HttpExecutor, NO_RESPONSE_STATUS, RequestExecutor, RequestResult};
