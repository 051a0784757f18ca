// ═══════════════════════════════════════════════════════════════════════
// Dice — the random source consumed by battles
// ═══════════════════════════════════════════════════════════════════════

use crate::types::DIE_SIDES;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// A stream of six-sided die rolls. Each call consumes one roll.
pub trait DiceRoller {
    /// Returns a value in `1..=DIE_SIDES`.
    fn roll(&mut self) -> u8;
}

/// Fair dice backed by a seeded ChaCha8 stream.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        SeededDice {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_rng(rng: ChaCha8Rng) -> Self {
        SeededDice { rng }
    }
}

impl DiceRoller for SeededDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_SIDES)
    }
}

/// Dice that replay a fixed script of rolls, for forcing battle outcomes.
/// Once the script runs out every roll is 1.
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    rolls: VecDeque<u8>,
}

impl LoadedDice {
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        LoadedDice {
            rolls: rolls.into_iter().map(|r| r.clamp(1, DIE_SIDES)).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DiceRoller for LoadedDice {
    fn roll(&mut self) -> u8 {
        self.rolls.pop_front().unwrap_or(1)
    }
}
