//! Tracing setup. The terminal belongs to the UI, so log lines go to a file,
//! and only when `REQLINE_LOG_LEVEL` is set.

use crate::config::DEFAULT_LOG_PATH;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{filter::Directive, fmt::time::ChronoLocal, EnvFilter};

/// Environment variable holding the filter, e.g. `debug` or `reqline=trace`
pub const LOG_LEVEL_ENV_VAR: &str = "REQLINE_LOG_LEVEL";

/// Dependencies that are too chatty below warn
const QUIET_TARGETS: [&str; 8] = [
    "reqwest",
    "hyper",
    "hyper_util",
    "h2",
    "rustls",
    "tokio",
    "tokio_rustls",
    "arboard",
];

pub fn log_path(log_file: Option<&str>) -> PathBuf {
    let path = log_file.unwrap_or(DEFAULT_LOG_PATH);
    PathBuf::from(shellexpand::tilde(path).to_string())
}

pub fn build_filter(directives: &str) -> EnvFilter {
    QUIET_TARGETS
        .iter()
        .filter_map(|target| format!("{target}=warn").parse::<Directive>().ok())
        .fold(EnvFilter::new(directives), EnvFilter::add_directive)
}

/// Install the file subscriber; a no-op unless the level variable is set.
/// Returns whether logging was enabled.
pub fn init_tracing_subscriber(log_file: Option<&str>) -> Result<bool> {
    let Ok(directives) = std::env::var(LOG_LEVEL_ENV_VAR) else {
        return Ok(false);
    };

    let path = log_path(log_file);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(&directives))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))?;

    tracing::info!("reqline {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_should_expand_tilde() {
        let path = log_path(None);
        assert!(path.ends_with(".reqline/reqline.log"));
        assert!(!path.to_string_lossy().starts_with('~'));
        assert_eq!(log_path(Some("/tmp/r.log")), PathBuf::from("/tmp/r.log"));
    }

    #[test]
    fn filter_should_cap_noisy_targets() {
        let filter = build_filter("debug").to_string();
        assert!(filter.contains("reqwest=warn"));
        assert!(filter.contains("hyper=warn"));
        assert!(filter.contains("debug"));
    }
}
