use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use similar::{ChangeTag, TextDiff};

use crate::theme::Theme;

/// Computes a displayable line-level diff between the two sides of a conflict.
pub trait DiffProvider {
    fn diff(&self, current: &[String], foreign: &[String]) -> Vec<Line<'static>>;
}

/// Line diff backed by `similar`, coloured from the active theme.
///
/// Removed lines exist only on the local side, added lines only on the
/// incoming side.
pub struct LineDiff {
    add: Color,
    del: Color,
    equal: Color,
}

impl LineDiff {
    pub fn new(theme: &Theme) -> Self {
        Self {
            add: theme.diff_add_fg,
            del: theme.diff_del_fg,
            equal: theme.diff_equal_fg,
        }
    }
}

impl DiffProvider for LineDiff {
    fn diff(&self, current: &[String], foreign: &[String]) -> Vec<Line<'static>> {
        let old: Vec<&str> = current.iter().map(String::as_str).collect();
        let new: Vec<&str> = foreign.iter().map(String::as_str).collect();
        let diff = TextDiff::from_slices(&old, &new);

        diff.iter_all_changes()
            .map(|change| {
                let (prefix, color) = match change.tag() {
                    ChangeTag::Delete => ("- ", self.del),
                    ChangeTag::Insert => ("+ ", self.add),
                    ChangeTag::Equal => ("  ", self.equal),
                };
                let style = Style::default().fg(color);
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(change.value().to_string(), style),
                ])
            })
            .collect()
    }
}
