//! Player input actions and the bounded queue they wait in.
//!
//! The host pushes inputs whenever they arrive; the frame driver drains the
//! queue at the start of each frame so inputs apply in arrival order and
//! never land in the middle of an update.

use crate::constants::INPUT_QUEUE_CAPACITY;
use std::collections::VecDeque;

/// Device-independent input actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameInput {
    Flap,
    Restart,
    /// Raw form values; sanitised when applied.
    SubmitProfile { name: String, color: String },
}

#[derive(Debug, Clone)]
pub struct InputQueue {
    pending: VecDeque<GameInput>,
    capacity: usize,
    dropped: u64,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(INPUT_QUEUE_CAPACITY)
    }
}

impl InputQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Queue an input. Returns false (and drops it) if the queue is full.
    pub fn push(&mut self, input: GameInput) -> bool {
        if self.pending.len() >= self.capacity {
            self.dropped += 1;
            tracing::warn!("Input queue full ({}), dropping {:?}", self.capacity, input);
            return false;
        }
        self.pending.push_back(input);
        true
    }

    /// Take every pending input, oldest first.
    pub fn drain(&mut self) -> Vec<GameInput> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Inputs rejected because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
