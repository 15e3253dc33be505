use anyhow::{Context, Result};
use git2::{Repository, StatusOptions};
use std::path::{Path, PathBuf};

pub struct RepoCache {
    repo: Repository,
    workdir: PathBuf,
}

impl RepoCache {
    pub fn open(path: &Path) -> Result<Self> {
        let repo =
            Repository::discover(path).context("Not a git repository (or any parent directory)")?;
        let workdir = repo
            .workdir()
            .context("Bare repositories are not supported")?
            .to_path_buf();
        Ok(Self { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Absolute paths of every file the index marks as conflicted, sorted.
    pub fn conflicted_paths(&self) -> Result<Vec<PathBuf>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .context("Failed to read repository status")?;

        let mut paths: Vec<PathBuf> = statuses
            .iter()
            .filter(|entry| entry.status().is_conflicted())
            .filter_map(|entry| entry.path().map(|p| self.workdir.join(p)))
            .collect();
        paths.sort();
        paths.dedup();
        Ok(paths)
    }

    /// Display name for `path`: relative to the work tree when inside it.
    pub fn display_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.workdir)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_outside_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("not-a-repo");
        std::fs::create_dir(&nested).unwrap();
        // tempdirs can live under a checkout; only assert when discovery finds nothing
        if Repository::discover(&nested).is_err() {
            assert!(RepoCache::open(&nested).is_err());
        }
    }

    #[test]
    fn test_fresh_repo_has_no_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello\n").unwrap();

        let cache = RepoCache::open(dir.path()).unwrap();
        assert!(cache.conflicted_paths().unwrap().is_empty());
    }

    #[test]
    fn test_display_name_is_workdir_relative() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let cache = RepoCache::open(dir.path()).unwrap();

        let inside = cache.workdir().join("src").join("lib.rs");
        assert_eq!(cache.display_name(&inside), Path::new("src").join("lib.rs").display().to_string());
        assert_eq!(cache.display_name(Path::new("/elsewhere/x.rs")), "/elsewhere/x.rs");
    }
}
