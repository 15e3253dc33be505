use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

const LOG_ENV: &str = "MMERGE_LOG";

/// Send log output to `file`. The terminal belongs to the TUI, so with no
/// file no logger is installed at all.
pub fn init(file: Option<&Path>) -> Result<()> {
    let Some(path) = file else {
        return Ok(());
    };

    let sink = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(sink)))
        .format_timestamp_millis()
        .try_init()
        .context("Logger already initialised")?;

    log::debug!("logging to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_is_noop() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn test_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing-dir").join("x.log");
        assert!(init(Some(&bad)).is_err());
    }
}
