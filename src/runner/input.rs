//! Translation of raw platform events into the three logical actions.

use super::render::{GameOverMenu, MenuButton};
use super::session::GamePhase;

/// Keys the core cares about. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
    Esc,
    Char(char),
    Other,
}

/// Raw event delivered by the platform once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close / interrupt.
    Quit,
    KeyDown(Key),
    /// Pointer press in world coordinates.
    PointerDown { x: f64, y: f64 },
}

/// UI-agnostic actions for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Jump,
    Restart,
}

/// Maps events to actions given the current phase.
#[derive(Debug, Clone, Copy)]
pub struct InputRouter {
    menu: GameOverMenu,
}

impl InputRouter {
    pub fn new(menu: GameOverMenu) -> Self {
        Self { menu }
    }

    pub fn route(&self, event: InputEvent, phase: GamePhase) -> Option<Action> {
        if matches!(event, InputEvent::Quit) {
            return Some(Action::Quit);
        }

        match phase {
            GamePhase::Playing => match event {
                InputEvent::KeyDown(Key::Space) | InputEvent::KeyDown(Key::Up) => {
                    Some(Action::Jump)
                }
                InputEvent::KeyDown(Key::Esc) => Some(Action::Quit),
                InputEvent::KeyDown(Key::Char(c)) if c.eq_ignore_ascii_case(&'q') => {
                    Some(Action::Quit)
                }
                _ => None,
            },
            GamePhase::GameOver => match event {
                InputEvent::KeyDown(Key::Char(c)) => {
                    if c.eq_ignore_ascii_case(&MenuButton::Restart.hotkey()) {
                        Some(Action::Restart)
                    } else if c.eq_ignore_ascii_case(&MenuButton::Quit.hotkey()) {
                        Some(Action::Quit)
                    } else {
                        None
                    }
                }
                InputEvent::KeyDown(Key::Esc) => Some(Action::Quit),
                InputEvent::PointerDown { x, y } => {
                    self.menu.hit_test(x, y).map(|button| match button {
                        MenuButton::Restart => Action::Restart,
                        MenuButton::Quit => Action::Quit,
                    })
                }
                _ => None,
            },
            GamePhase::Terminated => None,
        }
    }
}
