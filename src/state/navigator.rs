use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::conflict::{Conflict, FileLineIndex, ScrollDirection, Version};
use crate::diff::DiffProvider;
use crate::error::PresentationError;
use crate::event::KEY_BINDINGS;
use crate::presentation::{Panel, PresentationPort};
use crate::theme::Theme;

/// Whether there is still something left to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Scanning,
    /// Terminal: every conflict has a choice.
    Done,
}

/// Every conflict of the session, in discovery order, plus the cursor.
#[derive(Debug)]
pub struct Navigator {
    conflicts: Vec<Conflict>,
    cur: usize,
    files: FileLineIndex,
    state: SessionState,
}

impl Navigator {
    pub fn new(conflicts: Vec<Conflict>, files: FileLineIndex) -> Self {
        let state = if conflicts.is_empty() {
            SessionState::Done
        } else {
            SessionState::Scanning
        };
        Self {
            conflicts,
            cur: 0,
            files,
            state,
        }
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn files(&self) -> &FileLineIndex {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cur
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    pub fn resolved_count(&self) -> usize {
        self.conflicts.iter().filter(|c| c.is_resolved()).count()
    }

    pub fn current(&self) -> Option<&Conflict> {
        self.conflicts.get(self.cur)
    }

    pub fn current_mut(&mut self) -> Option<&mut Conflict> {
        self.conflicts.get_mut(self.cur)
    }

    /// Record a choice for the current conflict and move on.
    pub fn resolve(&mut self, version: Version) -> SessionState {
        let Some(conflict) = self.current_mut() else {
            return self.state;
        };
        conflict.resolve(version);
        log::info!(
            "resolved {}:{} as {:?}",
            conflict.file_name,
            conflict.start,
            version
        );
        self.advance_to_next_unresolved()
    }

    /// Step forward circularly to the next unresolved conflict.
    ///
    /// Always moves at least one step before checking, so the conflict under
    /// the cursor is never picked again. Coming back around to the starting
    /// index without finding anything ends the session, even if the starting
    /// conflict is itself unresolved.
    pub fn advance_to_next_unresolved(&mut self) -> SessionState {
        let n = self.conflicts.len();
        if n == 0 {
            self.state = SessionState::Done;
            return self.state;
        }

        let start = self.cur;
        let mut idx = start;
        for _ in 0..n {
            idx = (idx + 1) % n;
            if idx == start {
                break;
            }
            if !self.conflicts[idx].is_resolved() {
                self.cur = idx;
                self.state = SessionState::Scanning;
                return self.state;
            }
        }

        log::info!("no unresolved conflicts left after index {start}");
        self.state = SessionState::Done;
        self.state
    }

    /// Move the cursor one step forward, wrapping. Never ends the session.
    pub fn select_next(&mut self) {
        if !self.conflicts.is_empty() {
            self.cur = (self.cur + 1) % self.conflicts.len();
        }
    }

    /// Move the cursor one step back, wrapping. Never ends the session.
    pub fn select_prev(&mut self) {
        let n = self.conflicts.len();
        if n > 0 {
            self.cur = (self.cur + n - 1) % n;
        }
    }

    /// Shift the context window of conflict `index`. Out of range is a no-op.
    pub fn scroll(&mut self, index: usize, direction: ScrollDirection) {
        if let Some(conflict) = self.conflicts.get_mut(index) {
            conflict.scroll(direction);
        }
    }

    pub fn toggle_diff(&mut self) {
        if let Some(conflict) = self.current_mut() {
            conflict.toggle_diff();
        }
    }

    /// Push the list and both content panels for the current conflict.
    ///
    /// Clamps the current conflict's peeks as a side effect; otherwise calling
    /// it twice on unchanged state produces identical output.
    pub fn render<P: PresentationPort>(
        &mut self,
        show_help: bool,
        theme: &Theme,
        differ: &dyn DiffProvider,
        port: &mut P,
    ) -> Result<(), PresentationError> {
        port.set_list(self.list_lines(show_help, theme))?;

        let Some(conflict) = self.conflicts.get_mut(self.cur) else {
            return Ok(());
        };

        let lines = self.files.lines(&conflict.absolute_path);
        let view = conflict.viewport(lines);
        let muted = Style::default().fg(theme.context_fg);
        let above: Vec<Line<'static>> = view
            .above
            .iter()
            .map(|l| Line::styled(l.clone(), muted))
            .collect();
        let below: Vec<Line<'static>> = view
            .below
            .iter()
            .map(|l| Line::styled(l.clone(), muted))
            .collect();

        let middle = if conflict.display_diff() {
            differ.diff(&conflict.current_lines, &conflict.foreign_lines)
        } else {
            conflict.colored_current_lines.clone()
        };
        let body = [above.as_slice(), middle.as_slice(), below.as_slice()].concat();
        port.set_panel(
            Panel::Current,
            format!("{} (Current Change) ", conflict.current_name),
            body,
        )?;

        let body = [
            above.as_slice(),
            conflict.colored_foreign_lines.as_slice(),
            below.as_slice(),
        ]
        .concat();
        port.set_panel(
            Panel::Foreign,
            format!("{} (Incoming Change) ", conflict.foreign_name),
            body,
        )?;

        Ok(())
    }

    fn list_lines(&self, show_help: bool, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = self
            .conflicts
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                let entry = if c.is_resolved() {
                    Span::styled(
                        format!("\u{2705}  {}:{}", c.file_name, c.start),
                        Style::default().fg(theme.resolved),
                    )
                } else {
                    Span::styled(
                        format!("{}. {}:{}", idx + 1, c.file_name, c.start),
                        Style::default().fg(theme.unresolved),
                    )
                };
                if idx == self.cur {
                    Line::from(vec![
                        entry,
                        Span::styled(
                            " <-",
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                } else {
                    Line::from(entry)
                }
            })
            .collect();

        if show_help {
            lines.push(Line::raw(""));
            lines.extend(KEY_BINDINGS.iter().map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("{key:>7} "), Style::default().fg(theme.accent)),
                    Span::styled(*desc, Style::default().fg(theme.text_muted)),
                ])
            }));
        }

        lines
    }
}
