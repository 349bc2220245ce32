//! Process-wide tracing subscriber.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use monit::LogConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs stdout logging (level from `RUST_LOG`, default `info`), plus an
/// appending file sink when `config.file` is set. Call once per process.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .context("logging already initialised")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tracing::info;

    // the subscriber is process-wide, so both behaviours share one test
    #[test]
    fn file_sink_appends_and_second_install_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("monit.log");
        std::fs::write(&path, "earlier run\n").unwrap();
        let config = LogConfig {
            file: Some(path.clone()),
        };

        init_logging(&config).unwrap();
        info!(symbol = "BTCUSDT", "file sink check");
        assert!(init_logging(&LogConfig::default()).is_err());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("earlier run\n"));
        assert!(written.contains("file sink check"));
        assert!(written.contains("BTCUSDT"));
        // no colour codes in the file
        assert!(!written.contains('\u{1b}'));
    }
}
