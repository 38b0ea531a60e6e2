//! Flipping Bird - terminal arcade game library
//!
//! Exposes the simulation core, persistence and frame driver for the binary
//! and for integration tests.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame_loop;
pub mod game;
pub mod leaderboard;
pub mod profile;
pub mod store;

pub use error::StoreError;
pub use frame_loop::{FrameClock, FrameDriver};
pub use game::{GameEvent, GameInput, GameState, Playfield, Simulation, Snapshot};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use profile::PlayerProfile;
pub use store::{FileStore, KeyValueStore, MemoryStore};
