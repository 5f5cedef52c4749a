//! The runner: fixed column, vertical jump arc, run animation.

use crate::core::constants::{
    JUMP_APEX_HEIGHT, RUNNER_HEIGHT, RUNNER_WIDTH, RUNNER_X, RUN_ANIMATION_FRAMES,
    RUN_ANIMATION_FRAME_MS,
};

/// Observable jump phase. `Falling` is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpState {
    Grounded,
    Rising,
    Falling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub x: f64,
    /// Top edge. `rest_y` while grounded, smaller while airborne.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub jumping: bool,
    pub jump_height_accum: f64,
    /// Units per tick, both up and down.
    pub jump_speed: f64,
    rest_y: f64,
}

impl Character {
    /// Standard runner standing on `ground_line`.
    pub fn new(ground_line: f64, jump_speed: f64) -> Self {
        let rest_y = ground_line - RUNNER_HEIGHT;
        Self {
            x: RUNNER_X,
            y: rest_y,
            width: RUNNER_WIDTH,
            height: RUNNER_HEIGHT,
            jumping: false,
            jump_height_accum: 0.0,
            jump_speed,
            rest_y,
        }
    }

    pub fn rest_y(&self) -> f64 {
        self.rest_y
    }

    pub fn is_grounded(&self) -> bool {
        self.y >= self.rest_y
    }

    pub fn state(&self) -> JumpState {
        if self.jumping {
            JumpState::Rising
        } else if self.y < self.rest_y {
            JumpState::Falling
        } else {
            JumpState::Grounded
        }
    }

    /// Begin a jump. Ignored unless standing at rest (no double jumps).
    /// Returns true if the jump started.
    pub fn start_jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.jumping = true;
        true
    }

    /// Advance the jump arc by one tick.
    pub fn update(&mut self) {
        if self.jumping {
            self.y -= self.jump_speed;
            self.jump_height_accum += self.jump_speed;
            if self.jump_height_accum >= JUMP_APEX_HEIGHT {
                self.jumping = false;
            }
        } else if self.y < self.rest_y {
            self.y += self.jump_speed;
            self.jump_height_accum -= self.jump_speed;
            // Clamp overshoot when the speed does not divide the apex.
            if self.y >= self.rest_y {
                self.y = self.rest_y;
                self.jump_height_accum = 0.0;
            }
        }
    }

    /// Back to standing at rest.
    pub fn reset(&mut self) {
        self.y = self.rest_y;
        self.jumping = false;
        self.jump_height_accum = 0.0;
    }
}

/// Clock-driven frame cycling for the runner sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunAnimation {
    pub frame_index: usize,
    frame_count: usize,
    frame_delay_ms: u64,
    last_update_ms: Option<u64>,
}

impl Default for RunAnimation {
    fn default() -> Self {
        Self::new(RUN_ANIMATION_FRAMES, RUN_ANIMATION_FRAME_MS)
    }
}

impl RunAnimation {
    pub fn new(frame_count: usize, frame_delay_ms: u64) -> Self {
        Self {
            frame_index: 0,
            frame_count: frame_count.max(1),
            frame_delay_ms,
            last_update_ms: None,
        }
    }

    /// Step to the next frame once more than the frame delay has elapsed.
    pub fn update(&mut self, now_ms: u64) {
        let Some(last) = self.last_update_ms else {
            self.last_update_ms = Some(now_ms);
            return;
        };
        if now_ms.saturating_sub(last) > self.frame_delay_ms {
            self.frame_index = (self.frame_index + 1) % self.frame_count;
            self.last_update_ms = Some(now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f64 = 400.0;

    #[test]
    fn test_new_character_at_rest() {
        let c = Character::new(GROUND, 4.0);
        assert_eq!(c.x, 50.0);
        assert_eq!(c.y, 350.0);
        assert_eq!(c.rest_y(), 350.0);
        assert_eq!(c.state(), JumpState::Grounded);
    }

    #[test]
    fn test_jump_round_trip_exact() {
        let mut c = Character::new(GROUND, 4.0);
        assert!(c.start_jump());

        let mut up_ticks = 0;
        while c.jumping {
            c.update();
            up_ticks += 1;
        }
        assert_eq!(up_ticks, 20);
        assert_eq!(c.y, 270.0);
        assert_eq!(c.state(), JumpState::Falling);

        let mut down_ticks = 0;
        while !c.is_grounded() {
            c.update();
            down_ticks += 1;
        }
        assert_eq!(down_ticks, 20);
        assert_eq!(c.y, c.rest_y());
        assert_eq!(c.jump_height_accum, 0.0);
        assert_eq!(c.state(), JumpState::Grounded);
    }

    #[test]
    fn test_no_double_jump() {
        let mut c = Character::new(GROUND, 4.0);
        c.start_jump();
        c.update();
        assert!(!c.start_jump());
        assert_eq!(c.state(), JumpState::Rising);

        // Falling: still refused.
        while c.jumping {
            c.update();
        }
        c.update();
        assert!(!c.start_jump());
        assert_eq!(c.state(), JumpState::Falling);
    }

    #[test]
    fn test_non_divisible_speed_lands_exactly() {
        let mut c = Character::new(GROUND, 7.0);
        c.start_jump();
        for _ in 0..100 {
            c.update();
        }
        assert_eq!(c.y, c.rest_y());
        assert_eq!(c.state(), JumpState::Grounded);
    }

    #[test]
    fn test_grounded_update_is_noop() {
        let mut c = Character::new(GROUND, 4.0);
        c.update();
        assert_eq!(c.y, 350.0);
        assert_eq!(c.jump_height_accum, 0.0);
    }

    #[test]
    fn test_reset_from_mid_air() {
        let mut c = Character::new(GROUND, 4.0);
        c.start_jump();
        for _ in 0..5 {
            c.update();
        }
        c.reset();
        assert_eq!(c.state(), JumpState::Grounded);
        assert_eq!(c.y, 350.0);
    }

    #[test]
    fn test_animation_advances_after_delay() {
        let mut anim = RunAnimation::new(2, 100);
        anim.update(1000);
        assert_eq!(anim.frame_index, 0);
        anim.update(1100);
        assert_eq!(anim.frame_index, 0, "exactly the delay does not advance");
        anim.update(1101);
        assert_eq!(anim.frame_index, 1);
        anim.update(1250);
        assert_eq!(anim.frame_index, 0);
    }
}
