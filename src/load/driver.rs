use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult, HttpError};
use crate::http::{RequestExecutor, RequestResult};
use crate::report::Report;

use super::plan::LoadPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    pub index: usize,
    pub assigned: usize,
    pub completed: usize,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub report: Report,
    /// One entry per spawned worker, ordered by spawn index.
    pub workers: Vec<WorkerSummary>,
}

struct WorkerSet {
    summaries: Vec<WorkerSummary>,
    panicked: usize,
}

/// Runs every request of `plan` against `url` and aggregates the outcomes.
///
/// Request failures are counted, never propagated; the batch always runs to
/// completion.
///
/// # Errors
///
/// Returns an error only if the coordinator or a worker task panicked.
pub async fn run_load(
    executor: Arc<dyn RequestExecutor>,
    url: &str,
    plan: LoadPlan,
) -> AppResult<LoadOutcome> {
    let url: Arc<str> = Arc::from(url);
    let (results_tx, mut results_rx) = mpsc::channel::<RequestResult>(plan.result_buffer());
    let mut report = Report::new(plan.requests());

    info!(
        requests = plan.requests(),
        concurrency = plan.concurrency(),
        workers = plan.worker_count(),
        "Starting load run against {}",
        url
    );

    let run_start = Instant::now();
    let mut workers = JoinSet::new();
    for (index, assigned) in plan.worker_loads().into_iter().enumerate() {
        workers.spawn(run_worker(
            index,
            assigned,
            Arc::clone(&executor),
            Arc::clone(&url),
            results_tx.clone(),
        ));
    }
    // Workers now hold the only senders: the stream ends once the last one exits.
    drop(results_tx);

    let coordinator = tokio::spawn(await_workers(workers));

    while let Some(result) = results_rx.recv().await {
        report.record(&result);
    }
    let report = report.finish(run_start.elapsed());

    let worker_set = coordinator.await?;
    if worker_set.panicked > 0 {
        return Err(AppError::http(HttpError::WorkerPanicked {
            count: worker_set.panicked,
        }));
    }

    for summary in &worker_set.summaries {
        debug!(
            worker = summary.index,
            assigned = summary.assigned,
            completed = summary.completed,
            "Worker finished"
        );
    }
    info!(
        completed = report.completed(),
        errors = report.errors,
        elapsed_ms = u64::try_from(report.total_time.as_millis()).unwrap_or(u64::MAX),
        "Load run finished"
    );

    Ok(LoadOutcome {
        report,
        workers: worker_set.summaries,
    })
}

async fn run_worker(
    index: usize,
    assigned: usize,
    executor: Arc<dyn RequestExecutor>,
    url: Arc<str>,
    results_tx: mpsc::Sender<RequestResult>,
) -> WorkerSummary {
    let mut completed: usize = 0;
    for _ in 0..assigned {
        let result = executor.execute(&url).await;
        if let Some(reason) = result.error.as_deref() {
            debug!(worker = index, "Request failed: {}", reason);
        }
        if results_tx.send(result).await.is_err() {
            warn!(worker = index, "Result stream closed; stopping worker early.");
            break;
        }
        completed = completed.saturating_add(1);
    }
    WorkerSummary {
        index,
        assigned,
        completed,
    }
}

/// Counting barrier over every spawned worker. Runs beside the aggregation
/// loop so results are drained while workers are still going.
async fn await_workers(mut workers: JoinSet<WorkerSummary>) -> WorkerSet {
    let mut summaries = Vec::with_capacity(workers.len());
    let mut panicked: usize = 0;
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(summary) => summaries.push(summary),
            Err(err) => {
                error!("Worker task failed: {}", err);
                panicked = panicked.saturating_add(1);
            }
        }
    }
    summaries.sort_unstable_by_key(|summary| summary.index);
    WorkerSet {
        summaries,
        panicked,
    }
}
