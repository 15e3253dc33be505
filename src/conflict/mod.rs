pub mod file_index;
pub mod parser;

use std::path::PathBuf;

use ratatui::text::Line;

pub use file_index::{FileLineIndex, SourceFile};
pub use parser::{parse_conflicts, ConflictRegion};

/// Resolution state of a conflict region.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Choice {
    #[default]
    Unresolved = 0,
    Local = 1,
    Incoming = 2,
}

/// The side a user picks when resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Local,
    Incoming,
}

impl From<Version> for Choice {
    fn from(version: Version) -> Self {
        match version {
            Version::Local => Choice::Local,
            Version::Incoming => Choice::Incoming,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Context lines surrounding a conflict region, borrowed from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport<'a> {
    pub above: &'a [String],
    pub below: &'a [String],
}

/// One conflicting region of a file, plus its per-region view state.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub file_name: String,
    pub absolute_path: PathBuf,
    /// 1-based line of the `<<<<<<<` marker.
    pub start: usize,
    /// 1-based line of the `=======` marker.
    pub middle: usize,
    /// 1-based line of the `>>>>>>>` marker.
    pub end: usize,

    pub current_lines: Vec<String>,
    pub foreign_lines: Vec<String>,
    pub colored_current_lines: Vec<Line<'static>>,
    pub colored_foreign_lines: Vec<Line<'static>>,

    pub current_name: String,
    pub foreign_name: String,

    pub choice: Choice,

    // Signed so scrolling can overshoot; `viewport` pulls them back in range.
    top_peek: isize,
    bottom_peek: isize,
    display_diff: bool,
}

impl Conflict {
    pub fn new(file_name: impl Into<String>, absolute_path: PathBuf, region: ConflictRegion) -> Self {
        let colored_current_lines = plain_lines(&region.current_lines);
        let colored_foreign_lines = plain_lines(&region.foreign_lines);
        Self {
            file_name: file_name.into(),
            absolute_path,
            start: region.start,
            middle: region.middle,
            end: region.end,
            current_lines: region.current_lines,
            foreign_lines: region.foreign_lines,
            colored_current_lines,
            colored_foreign_lines,
            current_name: region.current_name,
            foreign_name: region.foreign_name,
            choice: Choice::Unresolved,
            top_peek: 0,
            bottom_peek: 0,
            display_diff: false,
        }
    }

    /// Replace the pre-rendered content of both sides.
    ///
    /// A side whose line count does not match its raw lines keeps the plain
    /// rendering so the two stay aligned.
    pub fn set_colored(&mut self, current: Vec<Line<'static>>, foreign: Vec<Line<'static>>) {
        if current.len() == self.current_lines.len() {
            self.colored_current_lines = current;
        }
        if foreign.len() == self.foreign_lines.len() {
            self.colored_foreign_lines = foreign;
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.choice != Choice::Unresolved
    }

    pub fn resolve(&mut self, version: Version) {
        self.choice = version.into();
    }

    pub fn toggle_diff(&mut self) {
        self.display_diff = !self.display_diff;
    }

    pub fn display_diff(&self) -> bool {
        self.display_diff
    }

    pub fn top_peek(&self) -> isize {
        self.top_peek
    }

    pub fn bottom_peek(&self) -> isize {
        self.bottom_peek
    }

    /// Shift the context window. No clamping happens here.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Up => {
                self.top_peek -= 1;
                self.bottom_peek += 1;
            }
            ScrollDirection::Down => {
                self.top_peek += 1;
            }
        }
    }

    /// Clamp the peek counts against the file and return the context lines
    /// immediately above and below the region.
    ///
    /// `top_peek` ends up in `[0, start - 1]` and `bottom_peek` in
    /// `[0, lines.len() - end]`. The clamped values are stored back.
    pub fn viewport<'a>(&mut self, lines: &'a [String]) -> Viewport<'a> {
        let first = self.start.saturating_sub(1).min(lines.len());
        let after = self.end.min(lines.len());

        self.top_peek = self.top_peek.clamp(0, first as isize);
        self.bottom_peek = self
            .bottom_peek
            .clamp(0, lines.len().saturating_sub(self.end) as isize);

        let top = self.top_peek as usize;
        let bottom = self.bottom_peek as usize;
        Viewport {
            above: &lines[first - top..first],
            below: &lines[after..after + bottom],
        }
    }
}

fn plain_lines(lines: &[String]) -> Vec<Line<'static>> {
    lines.iter().map(|l| Line::raw(l.clone())).collect()
}
