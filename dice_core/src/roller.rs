//! Roller - the randomness seam for every roll in the engine
//!
//! Anything implementing `rand::RngCore` is a roller, so callers can pass
//! `rand::thread_rng()` in production and a seeded `ChaCha8Rng` in tests.
//! `ScriptedRoller` replays forced natural results, which is how a pending
//! roll gets resolved with physical dice rolled at the table.

use rand::{Rng, RngCore};
use std::collections::VecDeque;
use tracing::trace;

/// Source of natural die results
pub trait Roller {
    /// Roll a single die, returning a value in `[1, sides]`
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<R: RngCore> Roller for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.gen_range(1..=sides.max(1))
    }
}

/// Replays a fixed queue of natural results
///
/// Values are clamped into the die's range. When the queue runs dry the
/// roller falls back to the thread RNG.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    queue: VecDeque<u32>,
}

impl ScriptedRoller {
    /// Create a roller that yields `values` in order
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        ScriptedRoller {
            queue: values.into_iter().collect(),
        }
    }

    /// Queue another forced result
    pub fn push(&mut self, value: u32) {
        self.queue.push_back(value);
    }

    /// Number of forced results not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Roller for ScriptedRoller {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let sides = sides.max(1);
        match self.queue.pop_front() {
            Some(value) => value.clamp(1, sides),
            None => {
                trace!(sides, "scripted rolls exhausted, falling back to thread rng");
                rand::thread_rng().roll_die(sides)
            }
        }
    }
}
