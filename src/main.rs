use std::panic;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc::channel;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::constants::{JOBS_CHANNEL_CAPACITY, RESULTS_CHANNEL_CAPACITY};
use crate::core::pipeline::benchmarking::handle_benchmarking;
use crate::domain::{BenchmarkJob, BenchmarkSet};
use crate::native::executor::NativeExecutor;
use crate::web::browser::SystemBrowser;
use crate::web::server::start_server;
use crate::web::template::DashboardTemplate;

mod config;
mod constants;
mod core;
mod domain;
mod native;
mod web;

#[cfg(test)]
mod integration_test;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    set_panic_hook();

    let config = Config::parse();
    tracing::debug!("Starting with config: {:?}", config);

    let template = DashboardTemplate::load(&config.template).await?;

    let (res_tx, res_rx) = channel::<BenchmarkSet>(RESULTS_CHANNEL_CAPACITY);
    let (job_tx, job_rx) = channel::<BenchmarkJob>(JOBS_CHANNEL_CAPACITY);
    handle_benchmarking(res_tx, job_rx, Arc::new(NativeExecutor::new()));
    job_tx.send(config.job()).await?;

    start_server(
        &config.bind.to_string(),
        Arc::new(template),
        res_rx,
        Arc::new(SystemBrowser),
    )
    .await?;

    Ok(())
}

fn set_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        tracing::error!(
            message = "panic occurred",
            panic = %panic_info
        );
    }));
}
