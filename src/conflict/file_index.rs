use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Full contents of one conflicted file, split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub lines: Vec<String>,
    /// Whether the file on disk ended with a newline.
    pub trailing_newline: bool,
    /// Line terminator used when writing the file back, taken from its first line break.
    pub line_ending: &'static str,
}

impl Default for SourceFile {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            trailing_newline: false,
            line_ending: "\n",
        }
    }
}

impl SourceFile {
    pub fn from_text(text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let line_ending = match text.find('\n') {
            Some(i) if text[..i].ends_with('\r') => "\r\n",
            _ => "\n",
        };
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect()
        };
        Self {
            lines,
            trailing_newline,
            line_ending,
        }
    }
}

/// Read-only map from absolute path to that file's lines, 0-indexed.
///
/// Loaded once before the session starts and never mutated afterwards.
#[derive(Debug, Default)]
pub struct FileLineIndex {
    files: HashMap<PathBuf, SourceFile>,
}

impl FileLineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf, file: SourceFile) {
        self.files.insert(path, file);
    }

    pub fn get(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    /// Lines of `path`, or an empty slice for an unknown path.
    pub fn lines(&self, path: &Path) -> &[String] {
        self.files.get(path).map_or(&[], |f| f.lines.as_slice())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_tracks_trailing_newline() {
        let file = SourceFile::from_text("a\nb\n");
        assert_eq!(file.lines, vec!["a", "b"]);
        assert!(file.trailing_newline);

        let file = SourceFile::from_text("a\nb");
        assert_eq!(file.lines, vec!["a", "b"]);
        assert!(!file.trailing_newline);
    }

    #[test]
    fn test_from_text_strips_carriage_returns() {
        let file = SourceFile::from_text("a\r\nb\r\n");
        assert_eq!(file.lines, vec!["a", "b"]);
        assert_eq!(file.line_ending, "\r\n");
    }

    #[test]
    fn test_from_text_line_ending_follows_first_break() {
        assert_eq!(SourceFile::from_text("a\nb\r\n").line_ending, "\n");
        assert_eq!(SourceFile::from_text("a\r\nb\n").line_ending, "\r\n");
        assert_eq!(SourceFile::from_text("single").line_ending, "\n");
    }

    #[test]
    fn test_from_text_empty() {
        let file = SourceFile::from_text("");
        assert!(file.lines.is_empty());
        assert!(!file.trailing_newline);
    }

    #[test]
    fn test_unknown_path_has_no_lines() {
        let index = FileLineIndex::new();
        assert!(index.lines(Path::new("/nope")).is_empty());
        assert!(index.is_empty());
    }
}
