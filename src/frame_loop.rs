//! Frame loop driver.
//!
//! Owns the simulation, the store and the random source. Each tick drains
//! queued inputs, works out the elapsed time and advances the simulation one
//! frame. Ticks take `&mut self`, so frames can never overlap.

use crate::game::{process_frame, process_input, GameEvent, GameInput, InputQueue, Playfield, Simulation, Snapshot};
use crate::leaderboard::Leaderboard;
use crate::profile::PlayerProfile;
use crate::store::KeyValueStore;
use rand::Rng;

/// Turns monotonic timestamps into per-frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call. The first call yields 0, and a
    /// timestamp that goes backwards yields 0 rather than a negative delta.
    pub fn delta(&mut self, timestamp_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => (timestamp_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt
    }
}

pub struct FrameDriver<S: KeyValueStore, R: Rng> {
    sim: Simulation,
    store: S,
    rng: R,
    inputs: InputQueue,
    clock: FrameClock,
}

impl<S: KeyValueStore, R: Rng> FrameDriver<S, R> {
    /// Build a driver, reading the leaderboard and profile from `store`.
    pub fn new(playfield: Playfield, store: S, rng: R) -> Self {
        let leaderboard = Leaderboard::load(&store);
        let profile = PlayerProfile::load(&store);
        tracing::info!(
            "Loaded {} leaderboard entries, profile: {}",
            leaderboard.len(),
            profile.as_ref().map(|p| p.name.as_str()).unwrap_or("<none>")
        );
        Self {
            sim: Simulation::new(playfield, leaderboard, profile),
            store,
            rng,
            inputs: InputQueue::default(),
            clock: FrameClock::new(),
        }
    }

    /// Queue an input for the next frame. False if the queue was full.
    pub fn push(&mut self, input: GameInput) -> bool {
        self.inputs.push(input)
    }

    /// Run one frame at an absolute monotonic timestamp (milliseconds).
    pub fn tick(&mut self, timestamp_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.delta(timestamp_ms);
        self.advance(dt)
    }

    /// Run one frame with an externally measured delta (milliseconds).
    pub fn advance(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for input in self.inputs.drain() {
            process_input(&mut self.sim, input, &mut self.store, &mut self.rng, &mut events);
        }
        process_frame(&mut self.sim, dt_ms, &mut self.store, &mut self.rng, &mut events);
        events
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(&self.sim)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Inputs lost to a full queue since the driver was created.
    pub fn dropped_inputs(&self) -> u64 {
        self.inputs.dropped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INPUT_QUEUE_CAPACITY;
    use crate::game::GameState;
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn driver() -> FrameDriver<MemoryStore, ChaCha8Rng> {
        FrameDriver::new(
            Playfield::default(),
            MemoryStore::new(),
            ChaCha8Rng::seed_from_u64(5),
        )
    }

    #[test]
    fn test_clock_first_delta_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert_eq!(clock.delta(1016.5), 16.5);
        assert_eq!(clock.delta(1010.0), 0.0);
        assert_eq!(clock.delta(1026.0), 16.0);
    }

    #[test]
    fn test_inputs_apply_at_frame_start() {
        let mut d = driver();
        d.push(GameInput::SubmitProfile {
            name: "Ann".to_string(),
            color: "#ff0000".to_string(),
        });
        assert_eq!(d.simulation().state, GameState::Idle);
        assert_eq!(d.pending_inputs(), 1);

        let events = d.tick(0.0);
        assert_eq!(d.pending_inputs(), 0);
        assert_eq!(d.simulation().state, GameState::Running);
        assert!(events.contains(&GameEvent::RunStarted));
    }

    #[test]
    fn test_full_queue_counts_dropped_inputs() {
        let mut d = driver();
        for _ in 0..INPUT_QUEUE_CAPACITY {
            assert!(d.push(GameInput::Restart));
        }
        assert!(!d.push(GameInput::Flap));
        assert_eq!(d.pending_inputs(), INPUT_QUEUE_CAPACITY);
        assert_eq!(d.dropped_inputs(), 1);

        d.advance(0.0);
        assert_eq!(d.pending_inputs(), 0);
        assert_eq!(d.dropped_inputs(), 1);
    }

    #[test]
    fn test_driver_reads_store() {
        let mut store = MemoryStore::new();
        PlayerProfile::sanitize("Bob", "").save(&mut store).unwrap();
        let mut board = Leaderboard::new();
        board.record_run(&mut store, "Bob", 8);

        let d = FrameDriver::new(Playfield::default(), store, ChaCha8Rng::seed_from_u64(1));
        let snap = d.snapshot();
        assert_eq!(snap.profile.map(|p| p.name.as_str()), Some("Bob"));
        assert_eq!(snap.leaderboard.len(), 1);
        assert!(snap.shows_menu());
    }
}
