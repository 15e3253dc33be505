use crate::conflict::{ScrollDirection, Version};

/// Every state mutation the event loop can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Lifecycle
    Quit,
    Tick,
    Resize,

    // Resolution
    Resolve(Version),

    // Navigation
    NextConflict,
    PrevConflict,
    Scroll(ScrollDirection),

    // View
    ToggleDiff,
    ToggleHelp,
}
