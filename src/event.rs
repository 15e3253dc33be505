use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::conflict::{ScrollDirection, Version};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Key hints shown in the HUD and in the help footer of the conflict list.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("1/h", "keep local"),
    ("2/l", "keep incoming"),
    ("j/k", "scroll"),
    ("d", "diff"),
    ("n/Tab", "next"),
    ("p", "prev"),
    ("?", "help"),
    ("q", "quit"),
];

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReader {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let event_tx = tx.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                match reader.next().await {
                    Some(Ok(CrosstermEvent::Key(key))) => {
                        // Windows reports both press and release.
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if event_tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Some(Ok(CrosstermEvent::Resize(_, _))) => {
                        if event_tx.send(Event::Resize).is_err() {
                            break;
                        }
                    }
                    Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        });

        let tick_tx = tx;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking: returns a pending event if one is available, or None.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// Map a key event to an action. Unbound keys map to nothing.
pub fn map_key_to_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('1') | KeyCode::Char('h') | KeyCode::Left => {
            Some(Action::Resolve(Version::Local))
        }
        KeyCode::Char('2') | KeyCode::Char('l') | KeyCode::Right => {
            Some(Action::Resolve(Version::Incoming))
        }
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Scroll(ScrollDirection::Down)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Scroll(ScrollDirection::Up)),
        KeyCode::Char('d') => Some(Action::ToggleDiff),
        KeyCode::Char('n') | KeyCode::Tab => Some(Action::NextConflict),
        KeyCode::Char('p') | KeyCode::BackTab => Some(Action::PrevConflict),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}
