use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::conflict::{Choice, Conflict, SourceFile};
use crate::state::Navigator;

/// Outcome of materializing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub file_name: String,
    pub resolved: usize,
    pub total: usize,
    pub written: bool,
}

impl FileReport {
    pub fn is_complete(&self) -> bool {
        self.resolved == self.total
    }
}

/// Build the new text of `file` from the choices made on its conflicts.
///
/// Resolved regions, markers included, are replaced by the chosen side.
/// Unresolved regions are copied through untouched. Lines are joined with
/// the file's own line ending.
pub fn render_resolved(file: &SourceFile, conflicts: &[&Conflict]) -> String {
    let lines = &file.lines;
    let mut ordered: Vec<&Conflict> = conflicts.to_vec();
    ordered.sort_by_key(|c| c.start);

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut next = 0;

    for conflict in ordered {
        let first = conflict.start.saturating_sub(1).min(lines.len());
        let after = conflict.end.min(lines.len());
        if first < next || after < first {
            log::warn!(
                "skipping overlapping region {}:{}",
                conflict.file_name,
                conflict.start
            );
            continue;
        }

        out.extend(lines[next..first].iter().map(String::as_str));
        match conflict.choice {
            Choice::Local => out.extend(conflict.current_lines.iter().map(String::as_str)),
            Choice::Incoming => out.extend(conflict.foreign_lines.iter().map(String::as_str)),
            Choice::Unresolved => out.extend(lines[first..after].iter().map(String::as_str)),
        }
        next = after;
    }
    out.extend(lines[next..].iter().map(String::as_str));

    let mut text = out.join(file.line_ending);
    if file.trailing_newline && !out.is_empty() {
        text.push_str(file.line_ending);
    }
    text
}

/// Group conflicts by file, keeping discovery order.
fn by_file(conflicts: &[Conflict]) -> Vec<(&Path, Vec<&Conflict>)> {
    let mut order: Vec<&Path> = Vec::new();
    let mut groups: HashMap<&Path, Vec<&Conflict>> = HashMap::new();
    for conflict in conflicts {
        let path = conflict.absolute_path.as_path();
        groups
            .entry(path)
            .or_insert_with(|| {
                order.push(path);
                Vec::new()
            })
            .push(conflict);
    }
    order
        .into_iter()
        .map(|path| {
            let group = groups.remove(path).unwrap_or_default();
            (path, group)
        })
        .collect()
}

/// Write every file that has at least one resolved conflict.
///
/// With `dry_run` nothing touches the disk; the reports still say what
/// would have been written.
pub fn write_all(navigator: &Navigator, dry_run: bool) -> Result<Vec<FileReport>> {
    let mut reports = Vec::new();

    for (path, conflicts) in by_file(navigator.conflicts()) {
        let resolved = conflicts.iter().filter(|c| c.is_resolved()).count();
        let file_name = conflicts
            .first()
            .map(|c| c.file_name.clone())
            .unwrap_or_else(|| path.display().to_string());
        let mut written = false;

        if resolved > 0 {
            let source = navigator
                .files()
                .get(path)
                .with_context(|| format!("No contents loaded for {}", path.display()))?;
            let text = render_resolved(source, &conflicts);
            if dry_run {
                log::info!("dry run: would write {}", path.display());
            } else {
                std::fs::write(path, text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!(
                    "wrote {} ({resolved}/{} resolved)",
                    path.display(),
                    conflicts.len()
                );
                written = true;
            }
        }

        reports.push(FileReport {
            path: path.to_path_buf(),
            file_name,
            resolved,
            total: conflicts.len(),
            written,
        });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::conflict::{parse_conflicts, FileLineIndex, Version};

    const SRC: &str = "top\n\
                       <<<<<<< HEAD\n\
                       mine 1\n\
                       =======\n\
                       yours 1\n\
                       >>>>>>> topic\n\
                       middle\n\
                       <<<<<<< HEAD\n\
                       mine 2\n\
                       ||||||| base\n\
                       old 2\n\
                       =======\n\
                       yours 2a\n\
                       yours 2b\n\
                       >>>>>>> topic\n\
                       bottom\n";

    fn load(path: &Path, text: &str) -> (SourceFile, Vec<Conflict>) {
        let file = SourceFile::from_text(text);
        let conflicts = parse_conflicts(path, &file.lines)
            .unwrap()
            .into_iter()
            .map(|r| Conflict::new("f.txt", path.to_path_buf(), r))
            .collect();
        (file, conflicts)
    }

    #[test]
    fn test_render_resolved_picks_sides() {
        let (file, mut conflicts) = load(Path::new("/f.txt"), SRC);
        conflicts[0].resolve(Version::Local);
        conflicts[1].resolve(Version::Incoming);
        let refs: Vec<&Conflict> = conflicts.iter().collect();
        assert_eq!(
            render_resolved(&file, &refs),
            "top\nmine 1\nmiddle\nyours 2a\nyours 2b\nbottom\n"
        );
    }

    #[test]
    fn test_render_resolved_leaves_unresolved_untouched() {
        let (file, mut conflicts) = load(Path::new("/f.txt"), SRC);
        conflicts[1].resolve(Version::Local);
        let refs: Vec<&Conflict> = conflicts.iter().collect();
        let out = render_resolved(&file, &refs);
        assert!(out.starts_with("top\n<<<<<<< HEAD\nmine 1\n=======\nyours 1\n>>>>>>> topic\nmiddle\n"));
        assert!(out.ends_with("middle\nmine 2\nbottom\n"));
    }

    #[test]
    fn test_render_resolved_without_trailing_newline() {
        let (file, mut conflicts) = load(Path::new("/f.txt"), "<<<<<<< a\nx\n=======\ny\n>>>>>>> b");
        conflicts[0].resolve(Version::Incoming);
        let refs: Vec<&Conflict> = conflicts.iter().collect();
        assert_eq!(render_resolved(&file, &refs), "y");
    }

    #[test]
    fn test_render_resolved_keeps_crlf() {
        let src = "keep\r\n<<<<<<< HEAD\r\nmine\r\n=======\r\nyours\r\n>>>>>>> t\r\ntail\r\n";
        let (file, mut conflicts) = load(Path::new("/f.txt"), src);
        conflicts[0].resolve(Version::Local);
        let refs: Vec<&Conflict> = conflicts.iter().collect();
        assert_eq!(render_resolved(&file, &refs), "keep\r\nmine\r\ntail\r\n");
    }

    #[test]
    fn test_render_resolved_crlf_unresolved_is_byte_identical() {
        let src = "a\r\n<<<<<<< HEAD\r\nx\r\n=======\r\ny\r\n>>>>>>> t\r\nb";
        let (file, conflicts) = load(Path::new("/f.txt"), src);
        let refs: Vec<&Conflict> = conflicts.iter().collect();
        assert_eq!(render_resolved(&file, &refs), src);
    }

    #[test]
    fn test_write_all_writes_only_touched_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, SRC).unwrap();
        std::fs::write(&b, SRC).unwrap();

        let mut files = FileLineIndex::new();
        let mut all = Vec::new();
        for path in [&a, &b] {
            let (file, conflicts) = load(path, SRC);
            files.insert(path.clone(), file);
            all.extend(conflicts);
        }
        all[0].resolve(Version::Incoming);
        all[1].resolve(Version::Local);

        let nav = Navigator::new(all, files);
        let reports = write_all(&nav, false).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports[0].written && reports[0].is_complete());
        assert!(!reports[1].written);
        assert_eq!(reports[1].resolved, 0);
        assert_eq!(
            std::fs::read_to_string(&a).unwrap(),
            "top\nyours 1\nmiddle\nmine 2\nbottom\n"
        );
        assert_eq!(std::fs::read_to_string(&b).unwrap(), SRC);
    }

    #[test]
    fn test_write_all_dry_run_leaves_disk_alone() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        std::fs::write(&a, SRC).unwrap();

        let (file, mut conflicts) = load(&a, SRC);
        conflicts[0].resolve(Version::Local);
        let mut files = FileLineIndex::new();
        files.insert(a.clone(), file);

        let reports = write_all(&Navigator::new(conflicts, files), true).unwrap();
        assert_eq!(reports[0].resolved, 1);
        assert!(!reports[0].written);
        assert!(!reports[0].is_complete());
        assert_eq!(std::fs::read_to_string(&a).unwrap(), SRC);
    }
}
