use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

use super::Component;

pub struct ContextBar;

impl Component for ContextBar {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let nav = &state.navigator;

        let location = nav
            .current()
            .map(|c| format!("{}:{}-{}", c.file_name, c.start, c.end))
            .unwrap_or_default();
        let mode = match nav.current() {
            Some(c) if c.display_diff() => "[diff]",
            _ => "[sides]",
        };

        let line = Line::from(vec![
            Span::styled(
                " mmerge ",
                Style::default().fg(theme.surface).bg(theme.accent),
            ),
            Span::raw("  "),
            Span::styled(
                location,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{}/{} resolved", nav.resolved_count(), nav.len()),
                Style::default().fg(theme.resolved),
            ),
            Span::raw(" "),
            Span::styled(mode, Style::default().fg(theme.text_muted)),
        ]);

        let bar = Paragraph::new(line).style(Style::default().bg(theme.surface));
        frame.render_widget(bar, area);
    }
}
