use std::sync::Arc;

use tokio::sync::mpsc::{Receiver, Sender};

use crate::{
    core::{
        failure::{FailureKind, RunFailure},
        traits::executor::Executor,
    },
    domain::{BenchmarkJob, BenchmarkSet},
};

const BENCHMARK_LINE_PREFIX: &str = "Benchmark";

/// Spawns the task that turns benchmark jobs into result sets.
///
/// Jobs are processed one at a time, so sets reach `res_tx` in job order.
/// The task ends when `job_rx` is closed or nobody reads `res_tx` anymore.
#[tracing::instrument(skip_all)]
pub fn handle_benchmarking(
    res_tx: Sender<BenchmarkSet>,
    mut job_rx: Receiver<BenchmarkJob>,
    executor: Arc<dyn Executor>,
) {
    tokio::spawn(async move {
        while let Some(job) = job_rx.recv().await {
            let Some(set) = process_job(&job, &executor).await else {
                continue;
            };
            if res_tx.send(set).await.is_err() {
                tracing::warn!("Result stream closed, stop benchmarking");
                return;
            }
        }
        tracing::debug!("Job stream closed");
    });
}

async fn process_job(job: &BenchmarkJob, executor: &Arc<dyn Executor>) -> Option<BenchmarkSet> {
    tracing::debug!("Running benchmark job: {:?}", job);

    let result = executor
        .run(&job.dir, &job.command, &job.args)
        .await
        .and_then(ensure_benchmarks);

    match result {
        Ok(output) => {
            tracing::info!(label = %job.label, "Benchmarks completed");
            Some(BenchmarkSet::new(&job.label, output))
        }
        Err(failure) => {
            tracing::error!(
                label = %job.label,
                kind = %failure.kind,
                "Benchmark run {}",
                failure
            );
            None
        }
    }
}

/// Rejects successful output that does not contain a single benchmark line.
fn ensure_benchmarks(output: String) -> Result<String, RunFailure> {
    if output
        .lines()
        .any(|line| line.starts_with(BENCHMARK_LINE_PREFIX))
    {
        Ok(output)
    } else {
        Err(RunFailure::new("no benchmarks found", String::new())
            .with_kind(FailureKind::NoBenchmarks))
    }
}
