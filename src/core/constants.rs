// World dimensions (reference screen, world units == pixels)
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 400.0;

// Tick and timing
pub const TICKS_PER_SECOND: u32 = 30;
pub const RUN_ANIMATION_FRAME_MS: u64 = 100;
pub const RUN_ANIMATION_FRAMES: usize = 2;

// Runner
pub const RUNNER_X: f64 = 50.0;
pub const RUNNER_WIDTH: f64 = 50.0;
pub const RUNNER_HEIGHT: f64 = 50.0;
pub const JUMP_SPEED: f64 = 4.0;
pub const JUMP_APEX_HEIGHT: f64 = 80.0;

// Obstacles
pub const INITIAL_OBSTACLE_SPEED: f64 = 3.0;
pub const BASE_OBSTACLE_SPEED: f64 = 5.0;
pub const SCORE_PER_SPEED_STEP: u32 = 10;
pub const MIN_OBSTACLE_GAP: f64 = 200.0;
pub const RESPAWN_OFFSET_MIN: u32 = 200;
pub const RESPAWN_OFFSET_MAX: u32 = 400; // inclusive
pub const PLACEMENT_SPAN: u32 = 400; // exclusive
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
pub const COLLISION_PREFILTER_RADIUS: f64 = 25.0;

// Background
pub const BACKGROUND_SCROLL_SPEED: f64 = 5.0;

// Game over menu (relative to screen centre)
pub const BUTTON_WIDTH: f64 = 200.0;
pub const BUTTON_HEIGHT: f64 = 50.0;
pub const BUTTON_SPACING: f64 = 60.0;
pub const GAME_OVER_TEXT_RISE: f64 = 50.0;

// HUD
pub const SCORE_TEXT_X: f64 = 10.0;
pub const SCORE_TEXT_Y: f64 = 10.0;
