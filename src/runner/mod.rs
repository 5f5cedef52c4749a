//! The runner game: obstacles, the jumping character, input routing and the
//! session state machine that ties them together.

pub mod character;
pub mod input;
pub mod obstacle;
pub mod obstacle_manager;
pub mod render;
pub mod session;

pub use character::{Character, JumpState, RunAnimation};
pub use input::{Action, InputEvent, InputRouter, Key};
pub use obstacle::{Obstacle, ObstacleKind};
pub use obstacle_manager::{speed_for_score, ObstacleManager, ObstacleSpec, SpawnRule};
pub use render::{
    GameOverMenu, MenuButton, RenderCommand, RenderFrame, Sprite, TextAnchor, TextColor, WorldRect,
};
pub use session::{new_session, GamePhase, Session, TickInput};
