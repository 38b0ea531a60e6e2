//! Simulation data: bird, pipes, particles and the context that owns them.

use crate::constants::*;
use crate::game::spawner::PipeSpawner;
use crate::leaderboard::Leaderboard;
use crate::profile::PlayerProfile;

/// Which subsystems run each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Menu shown, nothing moves.
    #[default]
    Idle,
    /// Simulation advances every frame.
    Running,
    /// Run is over, simulation frozen until restart.
    GameOver,
}

/// Logical playfield size. The host maps it onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT)
    }
}

impl Playfield {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Y coordinate of the ground line. Touching it ends the run.
    pub fn ground_y(&self) -> f64 {
        self.height - GROUND_MARGIN
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Fixed horizontal position of the centre.
    pub x: f64,
    /// Vertical position of the centre (y grows downward).
    pub y: f64,
    pub radius: f64,
    /// Vertical velocity per frame (negative = upward).
    pub vy: f64,
}

impl Bird {
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            x: BIRD_X,
            y: playfield.height / 2.0,
            radius: BIRD_RADIUS,
            vy: 0.0,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - self.radius
    }

    pub fn right(&self) -> f64 {
        self.x + self.radius
    }

    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }
}

/// A top/bottom barrier pair with a vertical gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge.
    pub x: f64,
    pub width: f64,
    /// Y of the gap's top edge (bottom of the upper barrier).
    pub top: f64,
    /// Gap height.
    pub gap: f64,
    /// Leftward movement per frame.
    pub speed: f64,
    /// Whether the bird has already passed this pipe.
    pub scored: bool,
    /// Tint hue in degrees, cosmetic.
    pub hue: f64,
}

impl Pipe {
    pub fn new(x: f64, top: f64) -> Self {
        Self {
            x,
            width: PIPE_WIDTH,
            top,
            gap: PIPE_GAP,
            speed: PIPE_SPEED,
            scored: false,
            hue: PIPE_HUE_MIN,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y of the gap's bottom edge (top of the lower barrier).
    pub fn gap_bottom(&self) -> f64 {
        self.top + self.gap
    }
}

/// Cosmetic flap puff.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Frames left to live.
    pub life: f64,
    pub hue: f64,
}

/// What the last finished run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    /// 1-based leaderboard position after the run, if it made the board.
    pub rank: Option<usize>,
}

/// Something that happened during an input or a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted,
    Flapped,
    PipeSpawned,
    PipeScored { score: u32 },
    RunEnded(RunSummary),
    /// Idle flap without a profile: the host should show the profile form.
    ProfileRequested,
    ProfileSaved(PlayerProfile),
    Reset,
}

/// The whole simulation context, owned by the frame driver.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: GameState,
    pub playfield: Playfield,
    pub bird: Bird,
    /// Active pipes, oldest (leftmost) first.
    pub pipes: Vec<Pipe>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub spawner: PipeSpawner,
    pub leaderboard: Leaderboard,
    pub profile: Option<PlayerProfile>,
    /// Set when a start was attempted without a profile.
    pub awaiting_profile: bool,
    pub last_run: Option<RunSummary>,
    /// Frames simulated in the current run.
    pub frame_count: u64,
}

impl Simulation {
    pub fn new(
        playfield: Playfield,
        leaderboard: Leaderboard,
        profile: Option<PlayerProfile>,
    ) -> Self {
        Self {
            state: GameState::Idle,
            playfield,
            bird: Bird::new(&playfield),
            pipes: Vec::new(),
            particles: Vec::new(),
            score: 0,
            spawner: PipeSpawner::default(),
            leaderboard,
            profile,
            awaiting_profile: false,
            last_run: None,
            frame_count: 0,
        }
    }

    /// Clear every per-run entity. Leaderboard and profile survive.
    pub fn reset_run(&mut self) {
        self.pipes.clear();
        self.particles.clear();
        self.score = 0;
        self.bird = Bird::new(&self.playfield);
        self.spawner.reset();
        self.frame_count = 0;
    }

    pub fn player_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.name.as_str())
    }
}
