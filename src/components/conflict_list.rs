use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::AppState;

use super::Component;

pub struct ConflictList;

impl Component for ConflictList {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let nav = &state.navigator;

        let title = format!(" Conflicts ({}/{}) ", nav.resolved_count(), nav.len());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));

        if nav.is_empty() {
            let paragraph = Paragraph::new(" No conflicts")
                .style(Style::default().fg(theme.text_muted))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        // Keep the selected row visible; help lines follow the entries.
        let inner_height = area.height.saturating_sub(2) as usize;
        let selected = nav.cursor();
        let scroll = if selected >= inner_height {
            selected - inner_height + 1
        } else {
            0
        };

        let block = if nav.len() > inner_height {
            block.title_bottom(Line::from(format!(" {}/{} ", selected + 1, nav.len())).right_aligned())
        } else {
            block
        };

        let paragraph = Paragraph::new(state.panels.list.clone())
            .block(block)
            .scroll((scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }
}
