use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

use crate::{
    constants::{DEFAULT_BIND, DEFAULT_COMMAND, DEFAULT_LABEL, DEFAULT_TEMPLATE_PATH},
    domain::BenchmarkJob,
};

/// Run benchmarks and watch the results in the browser.
#[derive(Parser, Debug, Clone)]
#[command(name = "benchdash", version)]
pub struct Config {
    /// Address the dashboard listens on; `:port` means loopback.
    #[arg(long, default_value = DEFAULT_BIND, value_parser = parse_bind)]
    pub bind: SocketAddr,

    /// Dashboard page template.
    #[arg(long, default_value = DEFAULT_TEMPLATE_PATH)]
    pub template: PathBuf,

    /// Directory the benchmark command runs in.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Label attached to the produced benchmark set.
    #[arg(long, default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Benchmark command and its arguments, passed without a shell.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Accepts `host:port`, or `:port` shorthand bound to the loopback interface.
fn parse_bind(value: &str) -> Result<SocketAddr, String> {
    let addr = match value.strip_prefix(':') {
        Some(port) => format!("127.0.0.1:{}", port),
        None => value.to_string(),
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| format!("invalid bind address {:?}: {}", value, e))
}

impl Config {
    pub fn job(&self) -> BenchmarkJob {
        let mut command_line = if self.command.is_empty() {
            DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect()
        } else {
            self.command.clone()
        };
        let command = command_line.remove(0);

        BenchmarkJob {
            label: self.label.clone(),
            dir: self.dir.clone(),
            command,
            args: command_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::server::bind_dashboard;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["benchdash"]).unwrap();

        assert_eq!(config.bind, "127.0.0.1:6222".parse().unwrap());
        assert_eq!(config.template, PathBuf::from("assets/index.html"));

        let job = config.job();
        assert_eq!(job.label, "HEAD");
        assert_eq!(job.dir, PathBuf::from("."));
        assert_eq!(job.command, "go");
        assert_eq!(job.args, vec!["test", "-run=^$", "-bench=."]);
    }

    #[test]
    fn test_trailing_command() {
        let config = Config::try_parse_from([
            "benchdash",
            "--bind",
            ":8080",
            "--dir",
            "/src/project",
            "cargo",
            "bench",
            "--noplot",
        ])
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:8080".parse().unwrap());
        let job = config.job();
        assert_eq!(job.dir, PathBuf::from("/src/project"));
        assert_eq!(job.command, "cargo");
        assert_eq!(job.args, vec!["bench", "--noplot"]);
    }

    #[test]
    fn test_bind_rejects_unparsable_address() {
        assert!(Config::try_parse_from(["benchdash", "--bind", "localhost"]).is_err());
        assert!(Config::try_parse_from(["benchdash", "--bind", ":port"]).is_err());
    }

    #[tokio::test]
    async fn test_port_shorthand_binds() {
        let config = Config::try_parse_from(["benchdash", "--bind", ":0"]).unwrap();
        assert!(config.bind.ip().is_loopback());

        let listener = bind_dashboard(&config.bind.to_string()).await.unwrap();

        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
