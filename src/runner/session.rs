//! Session controller: owns every piece of mutable game state and advances
//! it one fixed tick at a time.
//!
//! ```text
//!            collision             Quit
//!  PLAYING ────────────► GAME_OVER ─────► TERMINATED
//!     ▲                      │                ▲
//!     └────── Restart ───────┘                │
//!     └──────────────── Quit ─────────────────┘
//! ```

use super::character::{Character, RunAnimation};
use super::input::{Action, InputEvent, InputRouter};
use super::obstacle_manager::{ObstacleManager, ObstacleSpec};
use super::render::{GameOverMenu, RenderCommand, RenderFrame, Sprite, TextAnchor, TextColor};
use crate::core::config::GameConfig;
use crate::core::constants::{SCORE_TEXT_X, SCORE_TEXT_Y};
use crate::core::error::GameError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Top-level state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
    /// Absorbing: no further ticks have any effect.
    Terminated,
}

/// Everything the platform hands to one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Events drained this tick, in arrival order.
    pub events: Vec<InputEvent>,
    /// Monotonic clock reading in milliseconds.
    pub now_ms: u64,
}

impl TickInput {
    pub fn at(now_ms: u64) -> Self {
        Self {
            events: Vec::new(),
            now_ms,
        }
    }

    pub fn with_events(now_ms: u64, events: Vec<InputEvent>) -> Self {
        Self { events, now_ms }
    }
}

/// Create a session with reference tuning.
pub fn new_session(
    screen_width: f64,
    screen_height: f64,
    obstacle_specs: &[ObstacleSpec],
) -> Result<Session, GameError> {
    let config = GameConfig {
        screen_width,
        screen_height,
        obstacles: Some(obstacle_specs.to_vec()),
        ..GameConfig::default()
    };
    Session::from_config(&config)
}

#[derive(Debug, Clone)]
pub struct Session {
    screen_width: f64,
    screen_height: f64,
    phase: GamePhase,
    score: u32,
    background_offsets: (f64, f64),
    background_scroll_speed: f64,
    character: Character,
    animation: RunAnimation,
    obstacles: ObstacleManager,
    menu: GameOverMenu,
    router: InputRouter,
    rng: StdRng,
    tick_count: u64,
}

impl Session {
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Build with an explicit RNG.
    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        let ground_line = config.screen_height;
        let obstacles =
            ObstacleManager::new(&config.obstacle_specs(), config.screen_width, ground_line)?;
        let menu = GameOverMenu::new(config.screen_width, config.screen_height);

        log::info!(
            "new session: {}x{}, {} obstacles, seed {:?}",
            config.screen_width,
            config.screen_height,
            obstacles.len(),
            config.seed
        );

        Ok(Self {
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            phase: GamePhase::Playing,
            score: 0,
            background_offsets: (0.0, config.screen_width),
            background_scroll_speed: config.background_scroll_speed,
            character: Character::new(ground_line, config.jump_speed),
            animation: RunAnimation::default(),
            obstacles,
            menu,
            router: InputRouter::new(menu),
            rng,
            tick_count: 0,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == GamePhase::Terminated
    }

    /// False once terminated.
    pub fn running(&self) -> bool {
        self.phase != GamePhase::Terminated
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn screen_size(&self) -> (f64, f64) {
        (self.screen_width, self.screen_height)
    }

    pub fn background_offsets(&self) -> (f64, f64) {
        self.background_offsets
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut ObstacleManager {
        &mut self.obstacles
    }

    pub fn menu(&self) -> &GameOverMenu {
        &self.menu
    }

    /// One fixed tick: route input, advance the world, check for a crash,
    /// and describe the resulting frame.
    pub fn tick(&mut self, input: &TickInput) -> Result<RenderFrame, GameError> {
        if self.is_terminated() {
            return Ok(RenderFrame::terminated(self.score));
        }

        for &event in &input.events {
            match self.router.route(event, self.phase) {
                Some(Action::Quit) => {
                    self.terminate();
                    return Ok(RenderFrame::terminated(self.score));
                }
                Some(Action::Restart) => self.reset_session()?,
                Some(Action::Jump) => {
                    self.character.start_jump();
                }
                None => {}
            }
        }

        if self.phase == GamePhase::Playing {
            self.tick_count += 1;
            self.update(input.now_ms);

            let c = &self.character;
            if self.obstacles.any_collision(c.x, c.y, c.width, c.height) {
                log::info!("game over at tick {} with score {}", self.tick_count, self.score);
                self.phase = GamePhase::GameOver;
            }
        }

        Ok(self.render())
    }

    /// Motion, scoring and difficulty for one PLAYING tick.
    fn update(&mut self, now_ms: u64) {
        self.animation.update(now_ms);
        self.character.update();
        self.obstacles.advance_all(&mut self.rng);
        self.award_passes();
        self.obstacles.rescale_speed(self.score);
        self.scroll_background();

        log::trace!(
            "tick {}: y={} score={} obstacles={:?}",
            self.tick_count,
            self.character.y,
            self.score,
            self.obstacles.obstacles().iter().map(|o| o.x).collect::<Vec<_>>()
        );
    }

    /// Score every obstacle whose midpoint has crossed behind the runner's
    /// leading edge, once per recycle. Returns the number newly scored.
    pub fn award_passes(&mut self) -> u32 {
        let runner_x = self.character.x;
        let mut scored = 0;
        for obstacle in self.obstacles.obstacles_mut() {
            if obstacle.midpoint() < runner_x && !obstacle.passed {
                obstacle.passed = true;
                scored += 1;
            }
        }
        self.score += scored;
        scored
    }

    fn scroll_background(&mut self) {
        let width = self.screen_width;
        let speed = self.background_scroll_speed;
        let (a, b) = &mut self.background_offsets;
        for offset in [a, b] {
            *offset -= speed;
            if *offset < -width {
                *offset = width;
            }
        }
    }

    /// Back to a fresh PLAYING state. Background scroll is kept.
    pub fn reset_session(&mut self) -> Result<(), GameError> {
        self.obstacles.reset_all(&mut self.rng)?;
        self.character.reset();
        self.score = 0;
        self.phase = GamePhase::Playing;
        log::info!("session restarted");
        Ok(())
    }

    pub fn terminate(&mut self) {
        if self.phase != GamePhase::Terminated {
            log::info!("session terminated with score {}", self.score);
        }
        self.phase = GamePhase::Terminated;
    }

    /// Describe the current state as an ordered draw list.
    pub fn render(&self) -> RenderFrame {
        if self.is_terminated() {
            return RenderFrame::terminated(self.score);
        }

        let mut commands = Vec::with_capacity(self.obstacles.len() + 8);
        for x in [self.background_offsets.0, self.background_offsets.1] {
            commands.push(RenderCommand::Sprite {
                sprite: Sprite::Background,
                x,
                y: 0.0,
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        let c = &self.character;
        commands.push(RenderCommand::Sprite {
            sprite: Sprite::Runner {
                frame: self.animation.frame_index,
            },
            x: c.x,
            y: c.y,
            width: c.width,
            height: c.height,
        });

        self.obstacles.render_all(&mut commands);

        commands.push(RenderCommand::Text {
            text: format!("Score: {}", self.score),
            x: SCORE_TEXT_X,
            y: SCORE_TEXT_Y,
            color: TextColor::Plain,
            anchor: TextAnchor::Left,
        });

        if self.phase == GamePhase::GameOver {
            self.menu.render(self.score, &mut commands);
        }

        RenderFrame {
            phase: self.phase,
            score: self.score,
            commands,
        }
    }
}
