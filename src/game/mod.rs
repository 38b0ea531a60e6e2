//! Flipping Bird simulation core.
//!
//! A bird falls under gravity, flaps upward on input, and must thread the
//! gaps of pipes that scroll in from the right. Touching a pipe or the
//! ground ends the run and records the score on the leaderboard.

pub mod collision;
pub mod input;
pub mod physics;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod types;

pub use input::{GameInput, InputQueue};
pub use snapshot::Snapshot;
pub use state::{process_frame, process_input};
pub use types::*;
