use std::path::PathBuf;

/// Conditions that must stop the dashboard from starting at all.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed template: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PresenterError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("dashboard server stopped: {0}")]
    Serve(#[source] std::io::Error),
}

/// Per-request failure; only the affected client sees it.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}
