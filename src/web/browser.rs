use std::{process::Stdio, sync::Arc};

use tokio::process::Command;

/// Opener command per target OS, as reported by `std::env::consts::OS`.
const OPENERS: &[(&str, &[&str])] = &[
    ("macos", &["open"]),
    ("windows", &["cmd", "/c", "start"]),
];
const DEFAULT_OPENER: &[&str] = &["xdg-open"];

#[mockall::automock]
pub trait BrowserLauncher: Send + Sync {
    /// Reports whether the opener was started, not whether a window appeared.
    fn open(&self, url: &str) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> bool {
        start_browser(url)
    }
}

pub fn opener_for(os: &str) -> &'static [&'static str] {
    OPENERS
        .iter()
        .find(|(name, _)| *name == os)
        .map(|(_, opener)| *opener)
        .unwrap_or(DEFAULT_OPENER)
}

/// Starts the platform opener for `url` without waiting for it.
///
/// Must be called from within a tokio runtime.
pub fn start_browser(url: &str) -> bool {
    let Some((program, args)) = opener_for(std::env::consts::OS).split_first() else {
        return false;
    };

    match Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(error = %e, program, "failed to start browser opener");
            false
        }
    }
}

/// Fires the browser launch on a detached task; the outcome is only logged.
pub fn launch_detached(launcher: Arc<dyn BrowserLauncher>, url: String) {
    tokio::spawn(async move {
        if launcher.open(&url) {
            tracing::info!(%url, "Opened dashboard in browser");
        } else {
            tracing::warn!(%url, "Could not open browser, visit the dashboard manually");
        }
    });
}
