use std::path::Path;

use tokio::process::Command;

use crate::core::{failure::RunFailure, traits::executor::Executor};

/// Spawns commands as plain child processes, without a shell in between.
#[derive(Clone, Debug, Default)]
pub struct NativeExecutor;

impl NativeExecutor {
    pub fn new() -> Self {
        NativeExecutor
    }
}

#[async_trait::async_trait]
impl Executor for NativeExecutor {
    #[tracing::instrument(skip(self))]
    async fn run(
        &self,
        dir: &Path,
        command: &str,
        args: &[String],
    ) -> Result<String, RunFailure> {
        let out = Command::new(command)
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "command failed to start");
                RunFailure::new(e.to_string(), String::new())
            })?;

        if !out.status.success() {
            let failure = RunFailure::new(
                out.status.to_string(),
                String::from_utf8_lossy(&out.stderr),
            );
            tracing::debug!(kind = %failure.kind, status = %out.status, "command failed");
            return Err(failure);
        }

        Ok(String::from_utf8_lossy(&out.stdout).to_string())
    }
}
