use crate::args::PositiveUsize;
use crate::error::ValidationError;

/// Upper bound on the result channel capacity. tokio rejects huge bounded
/// channels; workers simply wait on a full buffer while the consumer drains.
pub const MAX_RESULT_BUFFER: usize = 1 << 20;

/// How a batch of `requests` is split across workers.
///
/// Every one of the `concurrency` workers gets `requests / concurrency`
/// requests. When that leaves a remainder, one extra worker is added for it,
/// so up to `concurrency + 1` workers may run at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPlan {
    requests: PositiveUsize,
    concurrency: PositiveUsize,
}

impl LoadPlan {
    /// # Errors
    ///
    /// Returns [`ValidationError::ConcurrencyExceedsRequests`] when there would
    /// be more workers than requests.
    pub fn new(requests: PositiveUsize, concurrency: PositiveUsize) -> Result<Self, ValidationError> {
        if concurrency > requests {
            return Err(ValidationError::ConcurrencyExceedsRequests {
                concurrency: concurrency.get(),
                requests: requests.get(),
            });
        }
        Ok(Self {
            requests,
            concurrency,
        })
    }

    #[must_use]
    pub const fn requests(self) -> usize {
        self.requests.get()
    }

    #[must_use]
    pub const fn concurrency(self) -> usize {
        self.concurrency.get()
    }

    #[must_use]
    pub fn per_worker(self) -> usize {
        self.requests().checked_div(self.concurrency()).unwrap_or(0)
    }

    #[must_use]
    pub fn remainder(self) -> usize {
        self.requests().checked_rem(self.concurrency()).unwrap_or(0)
    }

    #[must_use]
    pub fn worker_count(self) -> usize {
        self.concurrency()
            .saturating_add(usize::from(self.remainder() > 0))
    }

    /// Request count per worker, in spawn order. The remainder worker, if any,
    /// comes last.
    #[must_use]
    pub fn worker_loads(self) -> Vec<usize> {
        let mut loads = vec![self.per_worker(); self.concurrency()];
        let remainder = self.remainder();
        if remainder > 0 {
            loads.push(remainder);
        }
        loads
    }

    #[must_use]
    pub fn result_buffer(self) -> usize {
        self.requests().min(MAX_RESULT_BUFFER)
    }
}
