use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::presentation::{Panel, PanelContent};
use crate::state::AppState;

use super::Component;

/// One of the two content panels: local ("current") or incoming ("foreign").
pub struct ConflictPane {
    pub panel: Panel,
}

impl ConflictPane {
    pub fn current() -> Self {
        Self {
            panel: Panel::Current,
        }
    }

    pub fn foreign() -> Self {
        Self {
            panel: Panel::Foreign,
        }
    }

    fn content<'a>(&self, state: &'a AppState) -> Option<&'a PanelContent> {
        match self.panel {
            Panel::Current => Some(&state.panels.current),
            Panel::Foreign => Some(&state.panels.foreign),
            Panel::List => None,
        }
    }
}

impl Component for ConflictPane {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(content) = self.content(state) else {
            return;
        };
        let theme = &state.theme;

        let title = Span::styled(
            content.title.clone(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.text_muted));

        let paragraph = Paragraph::new(content.lines.clone()).block(block);
        frame.render_widget(paragraph, area);
    }
}
