//! Game state machine: Idle → Running → GameOver → Idle.
//!
//! Inputs and frames both arrive here. Each function appends what happened
//! to `events` so the host can react (sounds, menus) without inspecting
//! state diffs.

use super::collision::{any_collision, score_passed};
use super::input::GameInput;
use super::physics::{apply_flap, spawn_flap_particles, step_bird, step_particles, step_pipes, BirdStep};
use super::spawner::cull_offscreen;
use super::types::{GameEvent, GameState, RunSummary, Simulation};
use crate::constants::DEFAULT_PLAYER_NAME;
use crate::profile::PlayerProfile;
use crate::store::KeyValueStore;
use rand::Rng;

/// Apply one player input.
pub fn process_input<R: Rng>(
    sim: &mut Simulation,
    input: GameInput,
    store: &mut dyn KeyValueStore,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    match input {
        GameInput::Flap => flap(sim, rng, events),
        GameInput::Restart => restart(sim, events),
        GameInput::SubmitProfile { name, color } => {
            submit_profile(sim, &name, &color, store, events)
        }
    }
}

/// Advance the simulation by one frame. Does nothing unless Running.
pub fn process_frame<R: Rng>(
    sim: &mut Simulation,
    dt_ms: f64,
    store: &mut dyn KeyValueStore,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if sim.state != GameState::Running {
        return;
    }
    sim.frame_count += 1;

    let ground_y = sim.playfield.ground_y();
    if step_bird(&mut sim.bird, ground_y) == BirdStep::Grounded {
        end_run(sim, store, events);
        return;
    }
    step_particles(&mut sim.particles);

    if let Some(pipe) = sim.spawner.tick(dt_ms, &sim.playfield, rng) {
        sim.pipes.push(pipe);
        events.push(GameEvent::PipeSpawned);
    }

    step_pipes(&mut sim.pipes);
    cull_offscreen(&mut sim.pipes);

    for _ in 0..score_passed(&sim.bird, &mut sim.pipes) {
        sim.score += 1;
        events.push(GameEvent::PipeScored { score: sim.score });
    }

    if any_collision(&sim.bird, &sim.pipes) {
        end_run(sim, store, events);
    }
}

fn flap<R: Rng>(sim: &mut Simulation, rng: &mut R, events: &mut Vec<GameEvent>) {
    match sim.state {
        GameState::Idle => {
            if sim.profile.is_none() {
                sim.awaiting_profile = true;
                events.push(GameEvent::ProfileRequested);
                return;
            }
            start_run(sim, events);
            flap_bird(sim, rng, events);
        }
        GameState::Running => flap_bird(sim, rng, events),
        GameState::GameOver => {}
    }
}

fn flap_bird<R: Rng>(sim: &mut Simulation, rng: &mut R, events: &mut Vec<GameEvent>) {
    apply_flap(&mut sim.bird);
    spawn_flap_particles(&mut sim.particles, &sim.bird, rng);
    events.push(GameEvent::Flapped);
}

fn start_run(sim: &mut Simulation, events: &mut Vec<GameEvent>) {
    sim.reset_run();
    sim.state = GameState::Running;
    sim.awaiting_profile = false;
    tracing::debug!("Run started for {:?}", sim.player_name());
    events.push(GameEvent::RunStarted);
}

/// Form submission. Only meaningful from the menu, i.e. while Idle.
fn submit_profile(
    sim: &mut Simulation,
    name: &str,
    color: &str,
    store: &mut dyn KeyValueStore,
    events: &mut Vec<GameEvent>,
) {
    if sim.state != GameState::Idle {
        tracing::debug!("Ignoring profile submission while {:?}", sim.state);
        return;
    }

    let profile = PlayerProfile::sanitize(name, color);
    if let Err(e) = profile.save(store) {
        tracing::warn!("Failed to persist profile: {}", e);
    }
    sim.profile = Some(profile.clone());
    events.push(GameEvent::ProfileSaved(profile));
    start_run(sim, events);
}

/// Enter GameOver and record the run. Repeat calls are ignored.
fn end_run(sim: &mut Simulation, store: &mut dyn KeyValueStore, events: &mut Vec<GameEvent>) {
    if sim.state == GameState::GameOver {
        return;
    }
    sim.state = GameState::GameOver;

    let name = sim
        .player_name()
        .unwrap_or(DEFAULT_PLAYER_NAME)
        .to_string();
    let rank = sim.leaderboard.record_run(store, &name, sim.score);
    let summary = RunSummary {
        score: sim.score,
        rank,
    };
    tracing::info!(
        "Run over: {} scored {} after {} frames (rank {:?})",
        name,
        sim.score,
        sim.frame_count,
        rank
    );
    sim.last_run = Some(summary);
    events.push(GameEvent::RunEnded(summary));
}

/// Drop the current run and return to the menu.
fn restart(sim: &mut Simulation, events: &mut Vec<GameEvent>) {
    if sim.state == GameState::Running {
        tracing::debug!("Run abandoned at score {}", sim.score);
    }
    sim.reset_run();
    sim.state = GameState::Idle;
    events.push(GameEvent::Reset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FLAP_VELOCITY, GRAVITY};
    use crate::game::types::{Pipe, Playfield};
    use crate::leaderboard::Leaderboard;
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    fn sim_with_profile() -> Simulation {
        Simulation::new(
            Playfield::default(),
            Leaderboard::new(),
            Some(PlayerProfile::sanitize("Ann", "")),
        )
    }

    fn running() -> Simulation {
        let mut sim = sim_with_profile();
        sim.state = GameState::Running;
        sim
    }

    #[test]
    fn test_flap_without_profile_requests_form() {
        let mut sim = Simulation::new(Playfield::default(), Leaderboard::new(), None);
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        process_input(&mut sim, GameInput::Flap, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.state, GameState::Idle);
        assert!(sim.awaiting_profile);
        assert_eq!(events, vec![GameEvent::ProfileRequested]);
    }

    #[test]
    fn test_flap_with_profile_starts_and_flaps() {
        let mut sim = sim_with_profile();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        process_input(&mut sim, GameInput::Flap, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.state, GameState::Running);
        assert_eq!(sim.bird.vy, FLAP_VELOCITY);
        assert_eq!(events, vec![GameEvent::RunStarted, GameEvent::Flapped]);
        assert!(!sim.particles.is_empty());
    }

    #[test]
    fn test_submit_profile_starts_run() {
        let mut sim = Simulation::new(Playfield::default(), Leaderboard::new(), None);
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        let input = GameInput::SubmitProfile {
            name: "  ".to_string(),
            color: String::new(),
        };
        process_input(&mut sim, input, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.state, GameState::Running);
        assert_eq!(sim.player_name(), Some(DEFAULT_PLAYER_NAME));
        assert_eq!(PlayerProfile::load(&store), sim.profile);
        assert_eq!(events.last(), Some(&GameEvent::RunStarted));
    }

    #[test]
    fn test_submit_profile_ignored_while_running() {
        let mut sim = running();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        let input = GameInput::SubmitProfile {
            name: "Mallory".to_string(),
            color: String::new(),
        };
        process_input(&mut sim, input, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.player_name(), Some("Ann"));
        assert!(events.is_empty());
    }

    #[test]
    fn test_no_frame_when_idle() {
        let mut sim = sim_with_profile();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        let y = sim.bird.y;
        process_frame(&mut sim, 16.0, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.bird.y, y);
        assert_eq!(sim.frame_count, 0);
    }

    #[test]
    fn test_frame_applies_gravity() {
        let mut sim = running();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        process_frame(&mut sim, 16.0, &mut store, &mut rng(), &mut events);
        assert!((sim.bird.vy - GRAVITY).abs() < 1e-9);
        assert_eq!(sim.frame_count, 1);
    }

    #[test]
    fn test_pipe_collision_ends_run_once() {
        let mut sim = running();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        // Barrier directly over the bird, gap far below.
        sim.pipes.push(Pipe::new(140.0, 450.0));
        process_frame(&mut sim, 16.0, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.state, GameState::GameOver);

        end_run(&mut sim, &mut store, &mut events);
        let ended = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RunEnded(_)))
            .count();
        assert_eq!(ended, 1);
        assert_eq!(sim.leaderboard.best_score("Ann"), Some(0));
    }

    #[test]
    fn test_score_counts_before_same_frame_crash() {
        let mut sim = running();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        // Older pipe: right edge 148, drops behind the bird's left edge (146)
        // this frame.
        sim.pipes.push(Pipe::new(68.0, 200.0));
        // Newer pipe: barrier over the bird.
        sim.pipes.push(Pipe::new(150.0, 450.0));
        process_frame(&mut sim, 16.0, &mut store, &mut rng(), &mut events);

        assert_eq!(sim.state, GameState::GameOver);
        assert_eq!(sim.score, 1);
        let scored = events
            .iter()
            .position(|e| *e == GameEvent::PipeScored { score: 1 });
        let ended = events.iter().position(|e| {
            *e == GameEvent::RunEnded(RunSummary {
                score: 1,
                rank: Some(1),
            })
        });
        assert!(scored.is_some() && ended.is_some());
        assert!(scored < ended);
        assert_eq!(sim.leaderboard.best_score("Ann"), Some(1));
    }

    #[test]
    fn test_scoring_through_frames() {
        let mut sim = running();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        // Right edge at 148; one frame of scrolling puts it at 145, behind the bird at 146.
        let mut pipe = Pipe::new(68.0, 0.0);
        pipe.gap = 600.0;
        sim.pipes.push(pipe);
        for _ in 0..4 {
            process_frame(&mut sim, 16.0, &mut store, &mut rng(), &mut events);
        }
        assert_eq!(sim.score, 1);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::PipeScored { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_flap_ignored_after_game_over() {
        let mut sim = running();
        sim.state = GameState::GameOver;
        sim.bird.vy = 3.0;
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        process_input(&mut sim, GameInput::Flap, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.bird.vy, 3.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut sim = running();
        sim.state = GameState::GameOver;
        sim.score = 12;
        sim.pipes.push(Pipe::new(300.0, 100.0));
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        process_input(&mut sim, GameInput::Restart, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.state, GameState::Idle);
        assert_eq!(sim.score, 0);
        assert!(sim.pipes.is_empty());
        assert_eq!(events, vec![GameEvent::Reset]);
    }

    #[test]
    fn test_restart_mid_run_records_nothing() {
        let mut sim = running();
        sim.score = 4;
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        process_input(&mut sim, GameInput::Restart, &mut store, &mut rng(), &mut events);
        assert_eq!(sim.state, GameState::Idle);
        assert!(sim.leaderboard.is_empty());
    }
}
