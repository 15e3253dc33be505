use std::path::PathBuf;

use thiserror::Error;

use crate::presentation::Panel;

/// Errors raised while turning a file into conflict regions.
#[derive(Debug, Error)]
pub enum ConflictError {
    /// The file has no conflict markers at all.
    #[error("no conflict markers found in {}", .0.display())]
    NoConflictFound(PathBuf),

    /// Markers are present but do not form a well-formed region.
    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },
}

/// Errors surfaced by a presentation sink.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresentationError {
    #[error("panel {0:?} does not exist")]
    PanelMissing(Panel),
}
