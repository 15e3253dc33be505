use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

pub struct GitCli {
    workdir: std::path::PathBuf,
}

impl GitCli {
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }

    /// Mark a fully resolved file as resolved in the index.
    pub fn stage_file(&self, path: &Path) -> Result<()> {
        let output = Command::new("git")
            .args(["add", "--"])
            .arg(path)
            .current_dir(&self.workdir)
            .output()
            .context("Failed to run git add")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git add failed: {stderr}");
        }
        log::info!("staged {}", path.display());
        Ok(())
    }
}
