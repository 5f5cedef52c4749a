//! Ordered, fixed-size pool of obstacles.
//!
//! Index 0 is the spacing reference: every later obstacle is kept at least
//! `min_gap` away from its predecessor after a reset.

use super::obstacle::{Obstacle, ObstacleKind};
use super::render::{RenderCommand, Sprite};
use crate::core::constants::{
    BASE_OBSTACLE_SPEED, INITIAL_OBSTACLE_SPEED, MAX_PLACEMENT_ATTEMPTS, MIN_OBSTACLE_GAP,
    PLACEMENT_SPAN, SCORE_PER_SPEED_STEP,
};
use crate::core::error::GameError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Starting description of one obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub initial_x: f64,
    #[serde(default = "default_initial_speed")]
    pub initial_speed: f64,
}

fn default_initial_speed() -> f64 {
    INITIAL_OBSTACLE_SPEED
}

impl ObstacleSpec {
    pub fn new(kind: ObstacleKind, initial_x: f64) -> Self {
        Self {
            kind,
            initial_x,
            initial_speed: INITIAL_OBSTACLE_SPEED,
        }
    }

    /// A bush just off-screen followed by a rock further out.
    pub fn default_layout(screen_width: f64) -> Vec<ObstacleSpec> {
        vec![
            ObstacleSpec::new(ObstacleKind::Bush, screen_width + 50.0),
            ObstacleSpec::new(ObstacleKind::Rock, screen_width + 400.0),
        ]
    }
}

/// Placement parameters for `reset_all`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRule {
    /// Minimum distance between neighbouring obstacles.
    pub min_gap: f64,
    /// Placements are drawn from `[screen_width, screen_width + span)`.
    pub span: u32,
    /// Draws per obstacle before giving up.
    pub max_attempts: u32,
}

impl Default for SpawnRule {
    fn default() -> Self {
        Self {
            min_gap: MIN_OBSTACLE_GAP,
            span: PLACEMENT_SPAN,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Speed shared by every obstacle for a given score.
pub fn speed_for_score(score: u32) -> f64 {
    BASE_OBSTACLE_SPEED + (score / SCORE_PER_SPEED_STEP) as f64
}

#[derive(Debug, Clone)]
pub struct ObstacleManager {
    obstacles: Vec<Obstacle>,
    screen_width: f64,
    spawn_rule: SpawnRule,
}

impl ObstacleManager {
    pub fn new(
        specs: &[ObstacleSpec],
        screen_width: f64,
        ground_line: f64,
    ) -> Result<Self, GameError> {
        Self::with_spawn_rule(specs, screen_width, ground_line, SpawnRule::default())
    }

    pub fn with_spawn_rule(
        specs: &[ObstacleSpec],
        screen_width: f64,
        ground_line: f64,
        spawn_rule: SpawnRule,
    ) -> Result<Self, GameError> {
        if specs.is_empty() {
            return Err(GameError::Config(
                "at least one obstacle is required".to_string(),
            ));
        }
        if spawn_rule.span == 0 || spawn_rule.max_attempts == 0 {
            return Err(GameError::Config(
                "placement span and attempt budget must be positive".to_string(),
            ));
        }

        let obstacles = specs
            .iter()
            .map(|spec| Obstacle::new(spec.kind, spec.initial_x, spec.initial_speed, ground_line))
            .collect();

        Ok(Self {
            obstacles,
            screen_width,
            spawn_rule,
        })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Advance every obstacle one tick, in collection order.
    pub fn advance_all<R: Rng>(&mut self, rng: &mut R) {
        let screen_width = self.screen_width;
        for obstacle in &mut self.obstacles {
            obstacle.advance(screen_width, rng);
        }
    }

    /// Emit one sprite per obstacle, in collection order.
    pub fn render_all(&self, out: &mut Vec<RenderCommand>) {
        for obstacle in &self.obstacles {
            out.push(RenderCommand::Sprite {
                sprite: Sprite::Obstacle(obstacle.kind),
                x: obstacle.x,
                y: obstacle.y,
                width: obstacle.width,
                height: obstacle.height,
            });
        }
    }

    /// True if any obstacle hits the actor. Stops at the first hit.
    pub fn any_collision(&self, actor_x: f64, actor_y: f64, actor_w: f64, actor_h: f64) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.intersects(actor_x, actor_y, actor_w, actor_h))
    }

    /// Reposition every obstacle and enforce the minimum gap between
    /// neighbours by resampling.
    pub fn reset_all<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let screen_width = self.screen_width;
        for obstacle in &mut self.obstacles {
            obstacle.reset_position(screen_width, rng);
            obstacle.passed = false;
        }

        let rule = self.spawn_rule;
        let draw = |rng: &mut R| screen_width + rng.gen_range(0..rule.span) as f64;

        self.obstacles[0].x = draw(rng);
        for i in 1..self.obstacles.len() {
            let previous = self.obstacles[i - 1].x;
            let mut attempts = 0;
            while (self.obstacles[i].x - previous).abs() < rule.min_gap {
                if attempts >= rule.max_attempts {
                    log::warn!(
                        "obstacle {} unplaceable: gap {} within span {}",
                        i,
                        rule.min_gap,
                        rule.span
                    );
                    return Err(GameError::ObstaclePlacement { index: i, attempts });
                }
                self.obstacles[i].x = draw(rng);
                attempts += 1;
            }
        }
        Ok(())
    }

    /// Set the shared speed from the score. Idempotent.
    pub fn rescale_speed(&mut self, score: u32) {
        let speed = speed_for_score(score);
        for obstacle in &mut self.obstacles {
            obstacle.speed = speed;
        }
    }

    /// True when every neighbouring pair is at least `min_gap` apart.
    pub fn satisfies_min_gap(&self) -> bool {
        self.obstacles
            .windows(2)
            .all(|pair| (pair[1].x - pair[0].x).abs() >= self.spawn_rule.min_gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const WIDTH: f64 = 800.0;
    const GROUND: f64 = 400.0;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn default_manager() -> ObstacleManager {
        ObstacleManager::new(&ObstacleSpec::default_layout(WIDTH), WIDTH, GROUND).unwrap()
    }

    #[test]
    fn test_default_layout() {
        let manager = default_manager();
        assert_eq!(manager.len(), 2);
        let obstacles = manager.obstacles();
        assert_eq!(obstacles[0].kind, ObstacleKind::Bush);
        assert_eq!(obstacles[0].x, 850.0);
        assert_eq!(obstacles[1].kind, ObstacleKind::Rock);
        assert_eq!(obstacles[1].x, 1200.0);
        assert!(obstacles.iter().all(|o| o.speed == INITIAL_OBSTACLE_SPEED));
    }

    #[test]
    fn test_empty_layout_rejected() {
        let result = ObstacleManager::new(&[], WIDTH, GROUND);
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn test_advance_all_moves_every_obstacle() {
        let mut rng = create_test_rng();
        let mut manager = default_manager();
        manager.advance_all(&mut rng);
        assert_eq!(manager.obstacles()[0].x, 847.0);
        assert_eq!(manager.obstacles()[1].x, 1197.0);
    }

    #[test]
    fn test_render_all_in_collection_order() {
        let manager = default_manager();
        let mut out = Vec::new();
        manager.render_all(&mut out);
        assert_eq!(out.len(), 2);
        assert!(matches!(
            out[0],
            RenderCommand::Sprite {
                sprite: Sprite::Obstacle(ObstacleKind::Bush),
                ..
            }
        ));
        assert!(matches!(
            out[1],
            RenderCommand::Sprite {
                sprite: Sprite::Obstacle(ObstacleKind::Rock),
                ..
            }
        ));
    }

    #[test]
    fn test_any_collision() {
        let mut manager = default_manager();
        assert!(!manager.any_collision(50.0, 350.0, 50.0, 50.0));

        manager.obstacles_mut()[1].x = 60.0;
        assert!(manager.any_collision(50.0, 350.0, 50.0, 50.0));
    }

    #[test]
    fn test_rescale_speed_formula() {
        let mut manager = default_manager();
        for (score, expected) in [(0, 5.0), (9, 5.0), (10, 6.0), (25, 7.0), (100, 15.0)] {
            manager.rescale_speed(score);
            assert!(manager.obstacles().iter().all(|o| o.speed == expected));
        }
    }

    #[test]
    fn test_rescale_speed_idempotent() {
        let mut manager = default_manager();
        manager.rescale_speed(34);
        let once: Vec<f64> = manager.obstacles().iter().map(|o| o.speed).collect();
        manager.rescale_speed(34);
        let twice: Vec<f64> = manager.obstacles().iter().map(|o| o.speed).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reset_all_satisfies_min_gap() {
        let mut manager = default_manager();
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            manager.reset_all(&mut rng).unwrap();
            assert!(manager.satisfies_min_gap());
            for o in manager.obstacles() {
                assert!(o.x >= WIDTH && o.x <= WIDTH + 400.0);
            }
        }
    }

    #[test]
    fn test_reset_all_keeps_speed() {
        let mut rng = create_test_rng();
        let mut manager = default_manager();
        manager.rescale_speed(20);
        manager.reset_all(&mut rng).unwrap();
        assert!(manager.obstacles().iter().all(|o| o.speed == 7.0));
    }

    #[test]
    fn test_reset_all_single_obstacle() {
        let mut rng = create_test_rng();
        let specs = [ObstacleSpec::new(ObstacleKind::Rock, 900.0)];
        let mut manager = ObstacleManager::new(&specs, WIDTH, GROUND).unwrap();
        manager.reset_all(&mut rng).unwrap();
        assert!(manager.obstacles()[0].x >= WIDTH);
    }

    #[test]
    fn test_reset_all_unsatisfiable_gap_fails_fast() {
        let mut rng = create_test_rng();
        let rule = SpawnRule {
            min_gap: 500.0,
            span: 400,
            max_attempts: 50,
        };
        let mut manager = ObstacleManager::with_spawn_rule(
            &ObstacleSpec::default_layout(WIDTH),
            WIDTH,
            GROUND,
            rule,
        )
        .unwrap();
        let err = manager.reset_all(&mut rng).unwrap_err();
        assert!(matches!(
            err,
            GameError::ObstaclePlacement {
                index: 1,
                attempts: 50
            }
        ));
    }

    #[test]
    fn test_spec_deserializes_with_default_speed() {
        let spec: ObstacleSpec =
            serde_json::from_str(r#"{"kind":"rock","initial_x":1000.0}"#).unwrap();
        assert_eq!(spec.kind, ObstacleKind::Rock);
        assert_eq!(spec.initial_speed, INITIAL_OBSTACLE_SPEED);
    }
}
