use ratatui::text::Line;

use crate::error::PresentationError;

/// The logical panels a conflict is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    List,
    Current,
    Foreign,
}

/// Sink for everything the navigator wants on screen.
///
/// Implementations only store or draw what they are given; no layout or
/// styling decisions are made on this side.
pub trait PresentationPort {
    /// Replace the whole conflict list.
    fn set_list(&mut self, lines: Vec<Line<'static>>) -> Result<(), PresentationError>;

    /// Replace a content panel's title and body.
    fn set_panel(
        &mut self,
        panel: Panel,
        title: String,
        lines: Vec<Line<'static>>,
    ) -> Result<(), PresentationError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelContent {
    pub title: String,
    pub lines: Vec<Line<'static>>,
}

/// In-memory panels, read by the ratatui components on every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panels {
    pub list: Vec<Line<'static>>,
    pub current: PanelContent,
    pub foreign: PanelContent,
}

impl Panels {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationPort for Panels {
    fn set_list(&mut self, lines: Vec<Line<'static>>) -> Result<(), PresentationError> {
        self.list = lines;
        Ok(())
    }

    fn set_panel(
        &mut self,
        panel: Panel,
        title: String,
        lines: Vec<Line<'static>>,
    ) -> Result<(), PresentationError> {
        let target = match panel {
            Panel::Current => &mut self.current,
            Panel::Foreign => &mut self.foreign,
            Panel::List => return Err(PresentationError::PanelMissing(panel)),
        };
        *target = PanelContent { title, lines };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_panel_replaces_content() {
        let mut panels = Panels::new();
        panels
            .set_panel(Panel::Current, "a".into(), vec![Line::raw("x")])
            .unwrap();
        panels
            .set_panel(Panel::Current, "b".into(), vec![Line::raw("y")])
            .unwrap();
        assert_eq!(panels.current.title, "b");
        assert_eq!(panels.current.lines, vec![Line::raw("y")]);
        assert_eq!(panels.foreign, PanelContent::default());
    }

    #[test]
    fn test_list_is_not_a_content_panel() {
        let mut panels = Panels::new();
        let err = panels
            .set_panel(Panel::List, "t".into(), Vec::new())
            .unwrap_err();
        assert_eq!(err, PresentationError::PanelMissing(Panel::List));
    }
}
