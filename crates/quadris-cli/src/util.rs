use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
    sync::Mutex,
};

use anyhow::Context as _;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Events go to `log_file` when given, otherwise to stderr if `to_stderr` is
/// set, otherwise nowhere. The filter is read from `RUST_LOG` and defaults to
/// `info`.
pub fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))
                .context("Failed to install logger")?;
        }
        None if to_stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))
                .context("Failed to install logger")?;
        }
        None => {}
    }
    Ok(())
}

pub fn read_json_file<T>(path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;
    Ok(value)
}
