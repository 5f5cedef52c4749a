//! A single scrolling hazard.
//!
//! Obstacles are pooled: once one scrolls off the left edge it is moved back
//! beyond the right edge instead of being dropped, so the collection never
//! reallocates during a session.

use crate::core::constants::{
    COLLISION_PREFILTER_RADIUS, RESPAWN_OFFSET_MAX, RESPAWN_OFFSET_MIN,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Obstacle shapes. Behaviour is identical across kinds; only size and
/// sprite differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Bush,
    Rock,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Bush, ObstacleKind::Rock];

    /// Width in world units.
    pub fn width(&self) -> f64 {
        match self {
            Self::Bush => 30.0,
            Self::Rock => 50.0,
        }
    }

    /// Height in world units.
    pub fn height(&self) -> f64 {
        match self {
            Self::Bush => 30.0,
            Self::Rock => 50.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bush => "Bush",
            Self::Rock => "Rock",
        }
    }
}

/// A single obstacle resting on the ground line.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Leading (left) edge, world units.
    pub x: f64,
    /// Top edge. Always `ground_line - height`.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal units per tick.
    pub speed: f64,
    /// Set once the runner has cleared this obstacle in the current cycle.
    pub passed: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, initial_x: f64, speed: f64, ground_line: f64) -> Self {
        Self {
            kind,
            x: initial_x,
            y: ground_line - kind.height(),
            width: kind.width(),
            height: kind.height(),
            speed,
            passed: false,
        }
    }

    /// Move one tick to the left, recycling past the left boundary.
    pub fn advance<R: Rng>(&mut self, screen_width: f64, rng: &mut R) {
        self.x -= self.speed;
        if self.x < 0.0 {
            self.reset_position(screen_width, rng);
            self.passed = false;
        }
    }

    /// Reposition off-screen right. Speed and size are untouched.
    pub fn reset_position<R: Rng>(&mut self, screen_width: f64, rng: &mut R) {
        let offset = rng.gen_range(RESPAWN_OFFSET_MIN..=RESPAWN_OFFSET_MAX);
        self.x = screen_width + offset as f64;
    }

    /// Horizontal midpoint, used for pass detection.
    pub fn midpoint(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Collision predicate against an actor's box.
    ///
    /// A corner-to-corner distance prefilter (radius 25) gates a partial
    /// bounding-box test: horizontal overlap plus the actor's bottom edge
    /// below the obstacle's top. Both must hold.
    pub fn intersects(&self, actor_x: f64, actor_y: f64, actor_w: f64, actor_h: f64) -> bool {
        let dx = self.x - actor_x;
        let dy = self.y - actor_y;
        if (dx * dx + dy * dy).sqrt() >= COLLISION_PREFILTER_RADIUS {
            return false;
        }

        let horizontal = self.x < actor_x + actor_w && self.x + self.width > actor_x;
        let vertical = actor_y + actor_h > self.y;
        horizontal && vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const GROUND: f64 = 400.0;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_kind_dimensions() {
        assert_eq!(ObstacleKind::Bush.width(), 30.0);
        assert_eq!(ObstacleKind::Bush.height(), 30.0);
        assert_eq!(ObstacleKind::Rock.width(), 50.0);
        assert_eq!(ObstacleKind::Rock.height(), 50.0);
    }

    #[test]
    fn test_new_rests_on_ground() {
        for kind in ObstacleKind::ALL {
            let obstacle = Obstacle::new(kind, 900.0, 3.0, GROUND);
            assert_eq!(obstacle.y, GROUND - kind.height());
            assert!(!obstacle.passed);
        }
    }

    #[test]
    fn test_advance_moves_left_by_speed() {
        let mut rng = create_test_rng();
        let mut obstacle = Obstacle::new(ObstacleKind::Bush, 300.0, 5.0, GROUND);
        obstacle.advance(800.0, &mut rng);
        assert_eq!(obstacle.x, 295.0);
    }

    #[test]
    fn test_advance_recycles_past_left_edge() {
        let mut rng = create_test_rng();
        for start in [0.0, 1.0, 2.5, 4.9] {
            let mut obstacle = Obstacle::new(ObstacleKind::Rock, start, 5.0, GROUND);
            obstacle.passed = true;
            obstacle.advance(800.0, &mut rng);
            assert!(obstacle.x >= 1000.0 && obstacle.x <= 1200.0, "x = {}", obstacle.x);
            assert!(!obstacle.passed);
            assert_eq!(obstacle.speed, 5.0);
        }
    }

    #[test]
    fn test_advance_landing_exactly_on_zero_is_kept() {
        let mut rng = create_test_rng();
        let mut obstacle = Obstacle::new(ObstacleKind::Bush, 5.0, 5.0, GROUND);
        obstacle.passed = true;
        obstacle.advance(800.0, &mut rng);
        assert_eq!(obstacle.x, 0.0);
        assert!(obstacle.passed);
    }

    #[test]
    fn test_reset_position_range_over_many_draws() {
        let mut rng = create_test_rng();
        let mut obstacle = Obstacle::new(ObstacleKind::Bush, 10.0, 7.0, GROUND);
        for _ in 0..500 {
            obstacle.reset_position(800.0, &mut rng);
            assert!(obstacle.x >= 1000.0 && obstacle.x <= 1200.0);
        }
        assert_eq!(obstacle.speed, 7.0);
        assert_eq!(obstacle.width, 30.0);
    }

    #[test]
    fn test_intersects_near_contact() {
        let obstacle = Obstacle {
            kind: ObstacleKind::Bush,
            x: 60.0,
            y: 370.0,
            width: 30.0,
            height: 30.0,
            speed: 5.0,
            passed: false,
        };
        assert!(obstacle.intersects(50.0, 350.0, 50.0, 50.0));
    }

    #[test]
    fn test_intersects_rejected_by_prefilter() {
        let obstacle = Obstacle {
            kind: ObstacleKind::Bush,
            x: 200.0,
            y: 370.0,
            width: 30.0,
            height: 30.0,
            speed: 5.0,
            passed: false,
        };
        assert!(!obstacle.intersects(50.0, 350.0, 50.0, 50.0));
    }

    #[test]
    fn test_prefilter_rejects_real_overlap() {
        // Boxes overlap heavily but the corners are 30 units apart.
        let obstacle = Obstacle::new(ObstacleKind::Rock, 80.0, 5.0, GROUND);
        assert!(!obstacle.intersects(50.0, 350.0, 50.0, 50.0));
    }

    #[test]
    fn test_short_actor_above_top_clears_obstacle() {
        // Within the prefilter radius but the actor's bottom is above the top.
        let obstacle = Obstacle::new(ObstacleKind::Bush, 60.0, 5.0, GROUND);
        assert!(!obstacle.intersects(50.0, 355.0, 50.0, 10.0));
    }
}
