//! Timed pipe generation and off-screen culling.

use super::types::{Pipe, Playfield};
use crate::constants::{
    PIPE_BOTTOM_MARGIN, PIPE_CULL_X, PIPE_GAP, PIPE_HUE_MIN, PIPE_HUE_SPREAD, PIPE_MIN_TOP,
    PIPE_SPAWN_INTERVAL_MS, PIPE_SPAWN_OFFSET,
};
use rand::Rng;

/// Accumulates frame time and emits a pipe once the interval is exceeded.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSpawner {
    /// Milliseconds since the last spawn.
    pub timer_ms: f64,
    pub interval_ms: f64,
}

impl Default for PipeSpawner {
    fn default() -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms: PIPE_SPAWN_INTERVAL_MS,
        }
    }
}

impl PipeSpawner {
    pub fn reset(&mut self) {
        self.timer_ms = 0.0;
    }

    /// Add `dt_ms` to the timer. When it passes the interval, reset it and
    /// return a freshly generated pipe.
    pub fn tick<R: Rng>(&mut self, dt_ms: f64, playfield: &Playfield, rng: &mut R) -> Option<Pipe> {
        self.timer_ms += dt_ms;
        if self.timer_ms > self.interval_ms {
            self.timer_ms = 0.0;
            Some(make_pipe(playfield, rng))
        } else {
            None
        }
    }
}

/// Inclusive range a gap top may take so the gap keeps its margins.
pub fn gap_top_range(playfield: &Playfield, gap: f64) -> (f64, f64) {
    let min_top = PIPE_MIN_TOP;
    let max_top = playfield.ground_y() - gap - PIPE_BOTTOM_MARGIN;
    (min_top, max_top.max(min_top))
}

/// Generate a pipe just past the right edge with a random gap position.
pub fn make_pipe<R: Rng>(playfield: &Playfield, rng: &mut R) -> Pipe {
    let (min_top, max_top) = gap_top_range(playfield, PIPE_GAP);
    // Whole-pixel gap tops.
    let lo = min_top.ceil() as i64;
    let hi = (max_top.floor() as i64).max(lo);
    let top = rng.gen_range(lo..=hi) as f64;

    let mut pipe = Pipe::new(playfield.width + PIPE_SPAWN_OFFSET, top);
    pipe.hue = PIPE_HUE_MIN + rng.gen::<f64>() * PIPE_HUE_SPREAD;
    pipe
}

/// Remove pipes that have left the screen. Returns how many were removed.
pub fn cull_offscreen(pipes: &mut Vec<Pipe>) -> usize {
    let before = pipes.len();
    pipes.retain(|p| p.right() >= PIPE_CULL_X);
    before - pipes.len()
}
