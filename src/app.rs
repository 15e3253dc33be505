use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use std::time::Duration;

use crate::action::Action;
use crate::components::action_hud::ActionHud;
use crate::components::conflict_list::ConflictList;
use crate::components::conflict_pane::ConflictPane;
use crate::components::context_bar::ContextBar;
use crate::components::Component;
use crate::diff::LineDiff;
use crate::event::{map_key_to_action, Event, EventReader};
use crate::state::{AppState, Navigator, SessionState};
use crate::theme::Theme;
use crate::tui::Tui;

pub struct App {
    state: AppState,
    differ: LineDiff,
    status_clear_countdown: u32,
}

impl App {
    pub fn new(navigator: Navigator, theme: Theme, show_help: bool) -> Self {
        let differ = LineDiff::new(&theme);
        Self {
            state: AppState::new(navigator, theme, show_help),
            differ,
            status_clear_countdown: 0,
        }
    }

    pub fn into_navigator(self) -> Navigator {
        self.state.navigator
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventReader::new(Duration::from_millis(50));

        let context_bar = ContextBar;
        let conflict_list = ConflictList;
        let current_pane = ConflictPane::current();
        let foreign_pane = ConflictPane::foreign();
        let action_hud = ActionHud;

        self.present()?;

        loop {
            terminal.draw(|frame| {
                let outer = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Min(3),
                        Constraint::Length(1),
                    ])
                    .split(frame.area());

                let main = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(30),
                        Constraint::Percentage(35),
                        Constraint::Percentage(35),
                    ])
                    .split(outer[1]);

                context_bar.render(frame, outer[0], &self.state);
                conflict_list.render(frame, main[0], &self.state);
                current_pane.render(frame, main[1], &self.state);
                foreign_pane.render(frame, main[2], &self.state);
                action_hud.render(frame, outer[2], &self.state);
            })?;

            // Wait for one event, then drain whatever else is already queued.
            let first = events.next().await;
            let mut pending = Vec::new();
            if let Some(ev) = first {
                pending.push(ev);
            } else {
                break;
            }
            while let Some(ev) = events.try_next() {
                pending.push(ev);
            }

            for event in pending {
                let action = match event {
                    Event::Key(key) => map_key_to_action(key),
                    Event::Resize => Some(Action::Resize),
                    Event::Tick => Some(Action::Tick),
                };
                if let Some(action) = action {
                    self.update(action);
                    if !matches!(action, Action::Tick | Action::Resize) {
                        self.present()?;
                    }
                }
                if self.state.should_quit {
                    break;
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        log::info!("session ended: {:?}", self.state.navigator.state());
        Ok(())
    }

    /// Push the navigator's current view into the panels the components draw.
    fn present(&mut self) -> Result<()> {
        let state = &mut self.state;
        state
            .navigator
            .render(state.show_help, &state.theme, &self.differ, &mut state.panels)?;
        Ok(())
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                log::info!(
                    "quit with {}/{} resolved",
                    self.state.navigator.resolved_count(),
                    self.state.navigator.len()
                );
                self.state.should_quit = true;
            }
            Action::Tick => {
                if self.status_clear_countdown > 0 {
                    self.status_clear_countdown -= 1;
                    if self.status_clear_countdown == 0 {
                        self.state.status_message = None;
                    }
                }
            }
            Action::Resize => {}
            Action::Resolve(version) => {
                if self.state.navigator.resolve(version) == SessionState::Done {
                    self.state.should_quit = true;
                }
            }
            Action::NextConflict => self.state.navigator.select_next(),
            Action::PrevConflict => self.state.navigator.select_prev(),
            Action::Scroll(direction) => {
                let cur = self.state.navigator.cursor();
                self.state.navigator.scroll(cur, direction);
            }
            Action::ToggleDiff => self.state.navigator.toggle_diff(),
            Action::ToggleHelp => {
                self.state.show_help = !self.state.show_help;
                let msg = if self.state.show_help {
                    "Help shown"
                } else {
                    "Help hidden"
                };
                self.set_status(msg.to_string());
            }
        }
    }

    fn set_status(&mut self, msg: String) {
        self.state.status_message = Some(msg);
        // ~3 seconds at 50ms tick rate
        self.status_clear_countdown = 60;
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::conflict::{parse_conflicts, Conflict, FileLineIndex, ScrollDirection, SourceFile, Version};

    const SRC: &str = "a\n<<<<<<< HEAD\nx\n=======\ny\n>>>>>>> b\nm\n<<<<<<< HEAD\nx2\n=======\ny2\n>>>>>>> b\nz\n";

    fn app() -> App {
        let path = PathBuf::from("/work/f.txt");
        let file = SourceFile::from_text(SRC);
        let conflicts: Vec<Conflict> = parse_conflicts(Path::new("f.txt"), &file.lines)
            .unwrap()
            .into_iter()
            .map(|r| Conflict::new("f.txt", path.clone(), r))
            .collect();
        let mut files = FileLineIndex::new();
        files.insert(path, file);
        App::new(Navigator::new(conflicts, files), Theme::default(), false)
    }

    #[test]
    fn test_resolving_everything_quits() {
        let mut app = app();
        app.update(Action::Resolve(Version::Local));
        assert!(!app.state.should_quit);
        assert_eq!(app.state.navigator.cursor(), 1);
        app.update(Action::Resolve(Version::Incoming));
        assert!(app.state.should_quit);
        assert!(app.state.navigator.is_done());
    }

    #[test]
    fn test_quit_keeps_choices() {
        let mut app = app();
        app.update(Action::Resolve(Version::Local));
        app.update(Action::Quit);
        assert!(app.state.should_quit);
        let nav = app.into_navigator();
        assert_eq!(nav.resolved_count(), 1);
        assert!(!nav.is_done());
    }

    #[test]
    fn test_scroll_targets_current_conflict() {
        let mut app = app();
        app.update(Action::NextConflict);
        app.update(Action::Scroll(ScrollDirection::Down));
        let nav = &app.state.navigator;
        assert_eq!(nav.conflicts()[1].top_peek(), 1);
        assert_eq!(nav.conflicts()[0].top_peek(), 0);
    }

    #[test]
    fn test_present_fills_panels() {
        let mut app = app();
        app.present().unwrap();
        assert_eq!(app.state.panels.list.len(), 2);
        assert_eq!(app.state.panels.current.title, "HEAD (Current Change) ");
        assert!(!app.state.panels.foreign.lines.is_empty());
    }

    #[test]
    fn test_status_message_clears_after_ticks() {
        let mut app = app();
        app.update(Action::ToggleHelp);
        assert!(app.state.show_help);
        assert_eq!(app.state.status_message.as_deref(), Some("Help shown"));
        for _ in 0..60 {
            app.update(Action::Tick);
        }
        assert!(app.state.status_message.is_none());
    }
}
