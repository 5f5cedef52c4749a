//! Fixed-rate outer loop shared by the terminal game and tests.
//!
//! One thread owns the session. Each iteration drains input, runs exactly
//! one tick, presents the frame, then sleeps out the rest of the tick
//! budget. Quit is only observed at tick boundaries.

use crate::core::error::GameError;
use crate::runner::input::InputEvent;
use crate::runner::render::RenderFrame;
use crate::runner::session::{Session, TickInput};
use std::io;
use std::time::{Duration, Instant};

/// Services the loop needs from whatever hosts it.
pub trait Platform {
    /// Drain every pending event without blocking, in arrival order.
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;

    /// Draw a frame.
    fn present(&mut self, frame: &RenderFrame) -> io::Result<()>;

    /// Monotonic milliseconds.
    fn now_ms(&self) -> u64;

    /// Block until the next tick is due.
    fn sleep_until_next_tick(&mut self);
}

/// Sleeps out whatever remains of a tick's time budget.
#[derive(Debug, Clone)]
pub struct TickLimiter {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickLimiter {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / ticks_per_second.max(1),
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left in the current tick as seen at `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Sleep until the budget is spent, then start the next tick.
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last_tick = Some(Instant::now());
    }
}

/// Millisecond clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub final_score: u32,
}

/// Drive `session` until it terminates.
pub fn run<P: Platform>(platform: &mut P, session: &mut Session) -> Result<RunSummary, GameError> {
    let mut ticks = 0;
    loop {
        let events = platform.poll_events()?;
        let input = TickInput::with_events(platform.now_ms(), events);
        let frame = session.tick(&input)?;
        ticks += 1;

        if session.is_terminated() {
            break;
        }
        platform.present(&frame)?;
        platform.sleep_until_next_tick();
    }

    log::info!("loop finished after {} ticks", ticks);
    Ok(RunSummary {
        ticks,
        final_score: session.score(),
    })
}
