mod engine;
mod languages;
mod theme;

use std::path::Path;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

pub use engine::{HighlightEngine, HighlightSpan};

use crate::conflict::Conflict;
use crate::theme::{SyntaxColors, Theme};

/// Produces the pre-rendered content lines for both sides of a conflict.
pub struct Colorizer {
    engine: HighlightEngine,
    syntax: SyntaxColors,
    plain: Style,
}

impl Colorizer {
    pub fn new(engine: HighlightEngine, theme: &Theme) -> Self {
        Self {
            engine,
            syntax: theme.syntax.clone(),
            plain: Style::default().fg(theme.text),
        }
    }

    /// One styled line per input line; unknown languages come back plain.
    pub fn colorize(&self, path: &Path, lines: &[String]) -> Vec<Line<'static>> {
        let content = lines.join("\n");
        let spans = self
            .engine
            .highlight_lines(path, &content, &self.syntax)
            .unwrap_or_default();

        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let line_spans = spans.get(i).map(Vec::as_slice).unwrap_or(&[]);
                styled_line(line, line_spans, self.plain)
            })
            .collect()
    }

    pub fn apply(&self, conflict: &mut Conflict) {
        let current = self.colorize(&conflict.absolute_path, &conflict.current_lines);
        let foreign = self.colorize(&conflict.absolute_path, &conflict.foreign_lines);
        conflict.set_colored(current, foreign);
    }
}

fn styled_line(text: &str, spans: &[HighlightSpan], plain: Style) -> Line<'static> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor {
            continue;
        }
        if let Some(gap) = text.get(cursor..span.start).filter(|g| !g.is_empty()) {
            out.push(Span::styled(gap.to_string(), plain));
        }
        if let Some(piece) = text.get(span.start..span.end) {
            out.push(Span::styled(piece.to_string(), span.style));
            cursor = span.end;
        } else {
            cursor = span.start;
        }
    }

    if let Some(rest) = text.get(cursor..).filter(|r| !r.is_empty()) {
        out.push(Span::styled(rest.to_string(), plain));
    }

    Line::from(out)
}
