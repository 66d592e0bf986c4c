pub const DEFAULT_BIND: &str = "127.0.0.1:6222";
pub const DEFAULT_TEMPLATE_PATH: &str = "assets/index.html";
pub const DEFAULT_LABEL: &str = "HEAD";
pub const DEFAULT_COMMAND: &[&str] = &["go", "test", "-run=^$", "-bench=."];

pub const RESULTS_CHANNEL_CAPACITY: usize = 128;
pub const JOBS_CHANNEL_CAPACITY: usize = 16;

/// Most recent benchmark sets kept for the dashboard; older ones are dropped.
pub const MAX_BOARD_SETS: usize = 256;
