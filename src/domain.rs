use std::path::PathBuf;

use serde::Serialize;

/// One batch of benchmark output produced by a successful run.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BenchmarkSet {
    pub label: String,
    pub output: String,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

impl BenchmarkSet {
    pub fn new(label: &str, output: String) -> Self {
        Self {
            label: label.to_string(),
            output,
            recorded_at: chrono::Utc::now(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BenchmarkJob {
    pub label: String,
    pub dir: PathBuf,
    pub command: String,
    pub args: Vec<String>,
}
