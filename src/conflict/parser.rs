use std::path::Path;

use crate::error::ConflictError;

const OURS_MARKER: &str = "<<<<<<<";
const BASE_MARKER: &str = "|||||||";
const SEPARATOR: &str = "=======";
const THEIRS_MARKER: &str = ">>>>>>>";

const DEFAULT_CURRENT_NAME: &str = "HEAD";
const DEFAULT_FOREIGN_NAME: &str = "incoming";

/// One region delimited by conflict markers, with 1-based marker lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRegion {
    pub start: usize,
    pub middle: usize,
    pub end: usize,
    pub current_lines: Vec<String>,
    pub foreign_lines: Vec<String>,
    pub current_name: String,
    pub foreign_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Ours,
    Base,
    Theirs,
}

/// Returns the label after a marker, or `None` if `line` is not that marker.
fn marker_label<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    if rest.trim().is_empty() {
        Some("")
    } else if rest.starts_with(' ') || rest.starts_with('\t') {
        Some(rest.trim())
    } else {
        None
    }
}

fn label_or(label: &str, fallback: &str) -> String {
    if label.is_empty() {
        fallback.to_string()
    } else {
        label.to_string()
    }
}

/// Split a conflicted file into its marker-delimited regions.
///
/// diff3-style base sections (`|||||||` .. `=======`) are skipped. Marker-like
/// lines that appear where they cannot start or end a region are kept as
/// content.
pub fn parse_conflicts(path: &Path, lines: &[String]) -> Result<Vec<ConflictRegion>, ConflictError> {
    let malformed = |line: usize, reason: &'static str| ConflictError::Malformed {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut regions = Vec::new();
    let mut section = Section::Outside;
    let mut open: Option<ConflictRegion> = None;

    for (idx, line) in lines.iter().enumerate() {
        let lineno = idx + 1;

        if let Some(label) = marker_label(line, OURS_MARKER) {
            if section != Section::Outside {
                return Err(malformed(lineno, "nested conflict marker"));
            }
            open = Some(ConflictRegion {
                start: lineno,
                middle: 0,
                end: 0,
                current_lines: Vec::new(),
                foreign_lines: Vec::new(),
                current_name: label_or(label, DEFAULT_CURRENT_NAME),
                foreign_name: String::new(),
            });
            section = Section::Ours;
            continue;
        }

        let Some(region) = open.as_mut() else {
            continue;
        };

        match section {
            Section::Ours | Section::Base => {
                if marker_label(line, BASE_MARKER).is_some() && section == Section::Ours {
                    section = Section::Base;
                } else if line.trim_end() == SEPARATOR {
                    region.middle = lineno;
                    section = Section::Theirs;
                } else if marker_label(line, THEIRS_MARKER).is_some() {
                    return Err(malformed(lineno, "conflict closed before its separator"));
                } else if section == Section::Ours {
                    region.current_lines.push(line.clone());
                }
            }
            Section::Theirs => {
                if let Some(label) = marker_label(line, THEIRS_MARKER) {
                    region.end = lineno;
                    region.foreign_name = label_or(label, DEFAULT_FOREIGN_NAME);
                    section = Section::Outside;
                    if let Some(done) = open.take() {
                        regions.push(done);
                    }
                } else {
                    region.foreign_lines.push(line.clone());
                }
            }
            Section::Outside => {}
        }
    }

    if let Some(region) = open {
        return Err(malformed(region.start, "unterminated conflict"));
    }

    if regions.is_empty() {
        return Err(ConflictError::NoConflictFound(path.to_path_buf()));
    }

    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn test_parse_single_region() {
        let src = lines(
            "fn main() {\n\
             <<<<<<< HEAD\n\
             \x20   println!(\"ours\");\n\
             =======\n\
             \x20   println!(\"theirs\");\n\
             \x20   println!(\"more\");\n\
             >>>>>>> feature/login\n\
             }",
        );
        let regions = parse_conflicts(Path::new("main.rs"), &src).unwrap();
        assert_eq!(
            regions,
            vec![ConflictRegion {
                start: 2,
                middle: 4,
                end: 7,
                current_lines: vec!["    println!(\"ours\");".into()],
                foreign_lines: vec![
                    "    println!(\"theirs\");".into(),
                    "    println!(\"more\");".into()
                ],
                current_name: "HEAD".into(),
                foreign_name: "feature/login".into(),
            }]
        );
    }

    #[test]
    fn test_parse_multiple_regions_in_order() {
        let src = lines(
            "a\n<<<<<<< HEAD\nb\n=======\nc\n>>>>>>> x\nd\n<<<<<<< HEAD\ne\n=======\nf\n>>>>>>> x\n",
        );
        let regions = parse_conflicts(Path::new("f"), &src).unwrap();
        let bounds: Vec<_> = regions.iter().map(|r| (r.start, r.middle, r.end)).collect();
        assert_eq!(bounds, vec![(2, 4, 6), (8, 10, 12)]);
    }

    #[test]
    fn test_parse_skips_diff3_base() {
        let src = lines("<<<<<<< ours\nmine\n||||||| base\norig\n=======\nyours\n>>>>>>> theirs");
        let regions = parse_conflicts(Path::new("f"), &src).unwrap();
        assert_eq!(regions[0].current_lines, vec!["mine"]);
        assert_eq!(regions[0].foreign_lines, vec!["yours"]);
        assert_eq!(regions[0].middle, 5);
    }

    #[test]
    fn test_parse_defaults_missing_labels() {
        let src = lines("<<<<<<<\na\n=======\nb\n>>>>>>>");
        let regions = parse_conflicts(Path::new("f"), &src).unwrap();
        assert_eq!(regions[0].current_name, "HEAD");
        assert_eq!(regions[0].foreign_name, "incoming");
    }

    #[test]
    fn test_parse_empty_sides() {
        let src = lines("<<<<<<< HEAD\n=======\n>>>>>>> other");
        let regions = parse_conflicts(Path::new("f"), &src).unwrap();
        assert!(regions[0].current_lines.is_empty());
        assert!(regions[0].foreign_lines.is_empty());
    }

    #[test]
    fn test_separator_outside_region_is_content() {
        let src = lines("Title\n=======\n<<<<<<< HEAD\na\n=======\nb\n>>>>>>> x");
        let regions = parse_conflicts(Path::new("README.md"), &src).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].start, 3);
    }

    #[test]
    fn test_no_markers_is_no_conflict_found() {
        let src = lines("just\ntext");
        let err = parse_conflicts(Path::new("plain.txt"), &src).unwrap_err();
        assert!(matches!(err, ConflictError::NoConflictFound(_)));
    }

    #[test]
    fn test_unterminated_region_is_malformed() {
        let src = lines("x\n<<<<<<< HEAD\na\n=======\nb");
        let err = parse_conflicts(Path::new("f"), &src).unwrap_err();
        assert!(matches!(err, ConflictError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_nested_marker_is_malformed() {
        let src = lines("<<<<<<< HEAD\n<<<<<<< HEAD\n=======\n>>>>>>> x");
        let err = parse_conflicts(Path::new("f"), &src).unwrap_err();
        assert!(matches!(err, ConflictError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_close_before_separator_is_malformed() {
        let src = lines("<<<<<<< HEAD\na\n>>>>>>> x");
        let err = parse_conflicts(Path::new("f"), &src).unwrap_err();
        assert!(matches!(err, ConflictError::Malformed { line: 3, .. }));
    }

    #[test]
    fn test_longer_marker_runs_are_not_markers() {
        let src = lines("<<<<<<<< not a marker\n<<<<<<< HEAD\na\n=======\nb\n>>>>>>> x");
        let regions = parse_conflicts(Path::new("f"), &src).unwrap();
        assert_eq!(regions[0].start, 2);
    }
}
