pub mod action_hud;
pub mod conflict_list;
pub mod conflict_pane;
pub mod context_bar;

use ratatui::{layout::Rect, Frame};

use crate::state::AppState;

/// Trait for renderable TUI components.
pub trait Component {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);
}
