//! Platform-neutral draw list produced by each tick.
//!
//! Coordinates are world units with the origin at the top-left of the
//! screen. The frontend decides how a sprite or text looks; the core only
//! decides where it goes and in which order.

use super::obstacle::ObstacleKind;
use super::session::GamePhase;
use crate::core::constants::{BUTTON_HEIGHT, BUTTON_SPACING, BUTTON_WIDTH, GAME_OVER_TEXT_RISE};

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WorldRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Point-in-rect test, edges inclusive on the left/top only.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Image handles the frontend knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    /// One screen-wide background tile.
    Background,
    Runner { frame: usize },
    Obstacle(ObstacleKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    /// HUD text.
    Plain,
    /// Game-over banner.
    Alert,
}

/// Horizontal placement of a text command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// `x` is the left edge.
    Left,
    /// `x` is the horizontal centre.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Restart,
    Quit,
}

impl MenuButton {
    pub fn label(&self) -> &'static str {
        match self {
            MenuButton::Restart => "Restart",
            MenuButton::Quit => "Quit",
        }
    }

    /// Keyboard shortcut equivalent to clicking the button.
    pub fn hotkey(&self) -> char {
        match self {
            MenuButton::Restart => 'y',
            MenuButton::Quit => 'n',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Sprite {
        sprite: Sprite,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: TextColor,
        anchor: TextAnchor,
    },
    Button {
        button: MenuButton,
        rect: WorldRect,
    },
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub phase: GamePhase,
    pub score: u32,
    pub commands: Vec<RenderCommand>,
}

impl RenderFrame {
    /// Frame emitted once the session has terminated.
    pub fn terminated(score: u32) -> Self {
        Self {
            phase: GamePhase::Terminated,
            score,
            commands: Vec::new(),
        }
    }
}

/// Layout of the game-over modal for a given screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverMenu {
    pub title_x: f64,
    pub title_y: f64,
    pub restart: WorldRect,
    pub quit: WorldRect,
}

impl GameOverMenu {
    pub fn new(screen_width: f64, screen_height: f64) -> Self {
        let left = screen_width / 2.0 - BUTTON_WIDTH / 2.0;
        let top = screen_height / 2.0;
        Self {
            title_x: screen_width / 2.0,
            title_y: top - GAME_OVER_TEXT_RISE,
            restart: WorldRect::new(left, top, BUTTON_WIDTH, BUTTON_HEIGHT),
            quit: WorldRect::new(left, top + BUTTON_SPACING, BUTTON_WIDTH, BUTTON_HEIGHT),
        }
    }

    /// Which button, if any, sits under the pointer.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<MenuButton> {
        if self.restart.contains(x, y) {
            Some(MenuButton::Restart)
        } else if self.quit.contains(x, y) {
            Some(MenuButton::Quit)
        } else {
            None
        }
    }

    pub fn render(&self, score: u32, out: &mut Vec<RenderCommand>) {
        out.push(RenderCommand::Text {
            text: format!("Game Over! Your score: {}", score),
            x: self.title_x,
            y: self.title_y,
            color: TextColor::Alert,
            anchor: TextAnchor::Center,
        });
        out.push(RenderCommand::Button {
            button: MenuButton::Restart,
            rect: self.restart,
        });
        out.push(RenderCommand::Button {
            button: MenuButton::Quit,
            rect: self.quit,
        });
    }
}
