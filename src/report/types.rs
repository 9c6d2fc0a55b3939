use std::collections::HashMap;
use std::time::Duration;

use crate::http::RequestResult;

/// Aggregate of a finished (or in-progress) batch.
///
/// Counters are only ever touched by the single consumer draining the result
/// stream, so no synchronisation lives here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub total_time: Duration,
    /// Requested count, not necessarily the number that completed.
    pub total_requests: usize,
    pub status_codes: HashMap<u16, usize>,
    pub errors: usize,
}

impl Report {
    #[must_use]
    pub fn new(total_requests: usize) -> Self {
        Self {
            total_time: Duration::ZERO,
            total_requests,
            status_codes: HashMap::new(),
            errors: 0,
        }
    }

    /// Counts one attempt: failures go to `errors`, any received status
    /// (including 4xx/5xx) goes to `status_codes`.
    pub fn record(&mut self, result: &RequestResult) {
        if result.is_error() {
            self.errors = self.errors.saturating_add(1);
        } else {
            let count = self.status_codes.entry(result.status_code).or_insert(0);
            *count = count.saturating_add(1);
        }
    }

    #[must_use]
    pub const fn finish(mut self, total_time: Duration) -> Self {
        self.total_time = total_time;
        self
    }

    /// Attempts accounted for so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.status_codes
            .values()
            .fold(self.errors, |total, count| total.saturating_add(*count))
    }

    #[must_use]
    pub fn count_for(&self, status_code: u16) -> usize {
        self.status_codes.get(&status_code).copied().unwrap_or(0)
    }
}
