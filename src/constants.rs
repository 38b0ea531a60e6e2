// Playfield (logical pixels; the terminal host scales these onto cells)
pub const DEFAULT_PLAYFIELD_WIDTH: f64 = 800.0;
pub const DEFAULT_PLAYFIELD_HEIGHT: f64 = 600.0;
pub const GROUND_MARGIN: f64 = 60.0; // ground line sits this far above the bottom

// Bird physics (per frame)
pub const GRAVITY: f64 = 0.35;
pub const FLAP_VELOCITY: f64 = -6.5;
pub const BIRD_X: f64 = 160.0;
pub const BIRD_RADIUS: f64 = 14.0;

// Pipes
pub const PIPE_WIDTH: f64 = 80.0;
pub const PIPE_GAP: f64 = 160.0;
pub const PIPE_SPEED: f64 = 3.0;
pub const PIPE_MIN_TOP: f64 = 60.0;
pub const PIPE_BOTTOM_MARGIN: f64 = 60.0;
pub const PIPE_SPAWN_OFFSET: f64 = 20.0;
pub const PIPE_CULL_X: f64 = -10.0;
pub const PIPE_SPAWN_INTERVAL_MS: f64 = 1400.0;
pub const PIPE_HUE_MIN: f64 = 100.0;
pub const PIPE_HUE_SPREAD: f64 = 40.0;

// Flap particles
pub const PARTICLES_PER_FLAP: usize = 6;
pub const PARTICLE_LIFE_MIN: f64 = 25.0;
pub const PARTICLE_LIFE_SPREAD: f64 = 10.0;
pub const PARTICLE_Y_OFFSET: f64 = 5.0;

// Leaderboard and profile
pub const LEADERBOARD_SIZE: usize = 5;
pub const MAX_NAME_LEN: usize = 25;
pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const DEFAULT_BIRD_COLOR: &str = "#ffd54f";

// Persistence
pub const LEADERBOARD_KEY: &str = "leaderboard";
pub const PROFILE_KEY: &str = "playerProfile";
pub const RECORD_VERSION: u32 = 1;

// Frame loop
pub const INPUT_QUEUE_CAPACITY: usize = 64;
pub const DEFAULT_FPS: u32 = 60;
