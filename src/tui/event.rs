use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    Submit,
    EditInput,
    InputChar(char),
    InputBackspace,
    LeaveInput,
    Preview,
    OpenLink,
    DismissModal,
    None,
}

impl Action {
    /// Key mapping depends on where focus is: the URL input, the modal
    /// overlay, or the post list.
    pub fn from_key(key: KeyEvent, editing: bool, modal_open: bool) -> Self {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if modal_open {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Action::DismissModal,
                KeyCode::Char('o') => Action::OpenLink,
                _ => Action::None,
            };
        }

        if editing {
            return match key.code {
                KeyCode::Enter => Action::Submit,
                KeyCode::Esc => Action::LeaveInput,
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Char(c) => Action::InputChar(c),
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Char('i') | KeyCode::Char('/') => Action::EditInput,
            KeyCode::Enter | KeyCode::Char('v') => Action::Preview,
            KeyCode::Char('o') => Action::OpenLink,
            _ => Action::None,
        }
    }
}
