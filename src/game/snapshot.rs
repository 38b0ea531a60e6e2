//! Read-only view of the simulation for renderers and menus.

use super::types::{Bird, GameState, Particle, Pipe, Playfield, RunSummary, Simulation};
use crate::leaderboard::LeaderboardEntry;
use crate::profile::PlayerProfile;

/// Everything a renderer needs for one frame, borrowed from the simulation.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub playfield: Playfield,
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub particles: &'a [Particle],
    pub score: u32,
    pub leaderboard: &'a [LeaderboardEntry],
    pub profile: Option<&'a PlayerProfile>,
    pub awaiting_profile: bool,
    pub last_run: Option<RunSummary>,
}

impl<'a> Snapshot<'a> {
    pub fn of(sim: &'a Simulation) -> Self {
        Self {
            state: sim.state,
            playfield: sim.playfield,
            bird: &sim.bird,
            pipes: &sim.pipes,
            particles: &sim.particles,
            score: sim.score,
            leaderboard: sim.leaderboard.entries(),
            profile: sim.profile.as_ref(),
            awaiting_profile: sim.awaiting_profile,
            last_run: sim.last_run,
        }
    }

    /// The menu (profile form + leaderboard) is on screen.
    pub fn shows_menu(&self) -> bool {
        self.state == GameState::Idle
    }

    /// The game-over summary is on screen.
    pub fn shows_summary(&self) -> bool {
        self.state == GameState::GameOver
    }
}
