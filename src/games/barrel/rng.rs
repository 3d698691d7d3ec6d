//! Random source for skin drop rolls.
//!
//! The engine never reaches for a global generator; the session hands it a
//! `RandomSource`, so tests can seed or script every roll.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies uniform deviates in `[0, 100)`.
pub trait RandomSource {
    fn roll_percent(&mut self) -> f64;
}

/// PCG-backed rolls. The same seed always yields the same drop sequence.
pub struct PcgRolls {
    rng: Pcg32,
}

impl PcgRolls {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgRolls {
    fn roll_percent(&mut self) -> f64 {
        self.rng.random_range(0.0..100.0)
    }
}

/// Replays a fixed list of rolls, cycling when it runs out.
#[cfg(test)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRolls {
    pub fn new(rolls: &[f64]) -> Self {
        assert!(!rolls.is_empty(), "ScriptedRolls needs at least one roll");
        Self {
            rolls: rolls.to_vec(),
            next: 0,
        }
    }

    /// A source that never drops a skin (99.99 beats any chance below 100).
    pub fn never() -> Self {
        Self::new(&[99.99])
    }

    /// A source that always drops a skin when the chance is above zero.
    pub fn always() -> Self {
        Self::new(&[0.0])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRolls {
    fn roll_percent(&mut self) -> f64 {
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}
