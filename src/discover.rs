use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::conflict::{parse_conflicts, Conflict, FileLineIndex, SourceFile};
use crate::error::ConflictError;
use crate::git::RepoCache;
use crate::highlight::{Colorizer, HighlightEngine};
use crate::theme::Theme;

/// Files to work on: the given paths made absolute, or the repository's
/// conflicted files when none were given.
pub fn input_paths(given: &[PathBuf], cwd: &Path, repo: Option<&RepoCache>) -> Result<Vec<PathBuf>> {
    if !given.is_empty() {
        return Ok(given
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { cwd.join(p) })
            .collect());
    }

    let repo = repo.context(
        "Not a git repository (or any parent directory); pass the conflicted files explicitly",
    )?;
    let paths = repo.conflicted_paths()?;
    log::info!("found {} conflicted file(s) in {}", paths.len(), repo.workdir().display());
    Ok(paths)
}

/// Read and parse every path, returning the conflicts in discovery order
/// together with the loaded file contents.
///
/// Files without markers are skipped with a warning. Malformed markers abort
/// the load so nothing half-understood gets rewritten later.
pub fn load_conflicts(
    paths: &[PathBuf],
    display_name: impl Fn(&Path) -> String,
    theme: &Theme,
) -> Result<(Vec<Conflict>, FileLineIndex)> {
    let engine = HighlightEngine::for_paths(paths.iter().map(PathBuf::as_path));
    let colorizer = Colorizer::new(engine, theme);

    let mut files = FileLineIndex::new();
    let mut conflicts = Vec::new();

    for path in paths {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = SourceFile::from_text(&text);

        let regions = match parse_conflicts(path, &file.lines) {
            Ok(regions) => regions,
            Err(ConflictError::NoConflictFound(_)) => {
                log::warn!("{}: no conflict markers, skipping", path.display());
                eprintln!("mmerge: {}: no conflict markers, skipping", path.display());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let name = display_name(path);
        log::debug!("{name}: {} conflict(s)", regions.len());
        for region in regions {
            let mut conflict = Conflict::new(name.clone(), path.clone(), region);
            colorizer.apply(&mut conflict);
            conflicts.push(conflict);
        }
        files.insert(path.clone(), file);
    }

    Ok((conflicts, files))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFLICTED: &str = "fn a() {}\n<<<<<<< HEAD\nlet x = 1;\n=======\nlet x = 2;\n>>>>>>> feature\n";

    fn name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[test]
    fn test_given_paths_are_made_absolute() {
        let cwd = Path::new("/work");
        let paths = input_paths(
            &[PathBuf::from("a.rs"), PathBuf::from("/abs/b.rs")],
            cwd,
            None,
        )
        .unwrap();
        assert_eq!(paths, vec![PathBuf::from("/work/a.rs"), PathBuf::from("/abs/b.rs")]);
    }

    #[test]
    fn test_no_paths_without_repo_errors() {
        assert!(input_paths(&[], Path::new("/work"), None).is_err());
    }

    #[test]
    fn test_load_skips_clean_files() {
        let dir = tempfile::tempdir().unwrap();
        let clean = dir.path().join("clean.rs");
        let dirty = dir.path().join("dirty.rs");
        std::fs::write(&clean, "fn main() {}\n").unwrap();
        std::fs::write(&dirty, CONFLICTED).unwrap();

        let (conflicts, files) =
            load_conflicts(&[clean.clone(), dirty.clone()], name, &Theme::default()).unwrap();

        assert_eq!(conflicts.len(), 1);
        assert_eq!(files.len(), 1);
        assert!(files.get(&clean).is_none());

        let c = &conflicts[0];
        assert_eq!(c.file_name, "dirty.rs");
        assert_eq!((c.start, c.middle, c.end), (2, 4, 6));
        assert_eq!(c.foreign_name, "feature");
        assert_eq!(c.colored_current_lines.len(), c.current_lines.len());
    }

    #[test]
    fn test_load_rejects_malformed_markers() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.txt");
        std::fs::write(&bad, "<<<<<<< HEAD\nx\n").unwrap();
        assert!(load_conflicts(&[bad], name, &Theme::default()).is_err());
    }

    #[test]
    fn test_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.txt");
        assert!(load_conflicts(&[missing], name, &Theme::default()).is_err());
    }
}
