use crate::presentation::Panels;
use crate::theme::Theme;

use super::Navigator;

/// Everything the event loop mutates and the components read.
pub struct AppState {
    pub navigator: Navigator,
    /// Last output pushed by `Navigator::render`, drawn every frame.
    pub panels: Panels,
    pub theme: Theme,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(navigator: Navigator, theme: Theme, show_help: bool) -> Self {
        Self {
            navigator,
            panels: Panels::new(),
            theme,
            show_help,
            should_quit: false,
            status_message: None,
        }
    }
}
