use std::path::Path;

use crate::core::failure::RunFailure;

/// Runs a command to completion and hands back its standard output.
///
/// Implementations never retry and never time out: the returned future
/// resolves only once the child exits or fails to start.
#[mockall::automock]
#[async_trait::async_trait]
pub trait Executor: std::fmt::Debug + Send + Sync {
    async fn run(
        &self,
        dir: &Path,
        command: &str,
        args: &[String],
    ) -> Result<String, RunFailure>;
}
