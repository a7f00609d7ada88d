use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

pub const DAMAGE_ROLL_MIN: f64 = 0.85;
pub const DAMAGE_ROLL_MAX: f64 = 1.0;

#[derive(Debug, Clone)]
enum Source {
    Seeded { rng: StdRng, seed: u64 },
    Scripted { outcomes: Vec<u8>, index: usize },
}

/// The single source of randomness for one battle.
///
/// Every draw takes a reason label that is traced, so a recorded seed (or a
/// scripted list of outcomes) reproduces an identical battle trace. Scripted
/// outcomes are values in `1..=100`.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: Source,
}

impl BattleRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: Source::Seeded {
                rng: StdRng::seed_from_u64(seed),
                seed,
            },
        }
    }

    /// Seed from the OS, for callers that do not care about replay.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// Replay a fixed list of outcomes. Running out of outcomes panics,
    /// naming the draw that needed one.
    pub fn scripted(outcomes: Vec<u8>) -> Self {
        Self {
            source: Source::Scripted { outcomes, index: 0 },
        }
    }

    pub fn seed(&self) -> Option<u64> {
        match &self.source {
            Source::Seeded { seed, .. } => Some(*seed),
            Source::Scripted { .. } => None,
        }
    }

    /// A percentile roll in `1..=100`.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            Source::Seeded { rng, .. } => rng.random_range(1..=100),
            Source::Scripted { outcomes, index } => {
                let Some(&outcome) = outcomes.get(*index) else {
                    panic!(
                        "BattleRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                outcome.clamp(1, 100)
            }
        };
        trace!(outcome, reason, "rng outcome consumed");
        outcome
    }

    /// Damage spread factor in `[0.85, 1.0]`. A scripted outcome of 1 gives
    /// the minimum and 100 gives the maximum.
    pub fn damage_roll(&mut self, reason: &str) -> f64 {
        let roll = if let Source::Seeded { rng, .. } = &mut self.source {
            rng.random_range(DAMAGE_ROLL_MIN..=DAMAGE_ROLL_MAX)
        } else {
            let outcome = self.next_outcome(reason);
            DAMAGE_ROLL_MAX - (DAMAGE_ROLL_MAX - DAMAGE_ROLL_MIN) * (100 - outcome) as f64 / 99.0
        };
        trace!(roll, reason, "damage roll");
        roll
    }

    /// Fair coin; a scripted outcome of 50 or below is heads.
    pub fn coin_flip(&mut self, reason: &str) -> bool {
        self.next_outcome(reason) <= 50
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    pub fn choose_index(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0, "choose_index called with an empty range");
        let index = if let Source::Seeded { rng, .. } = &mut self.source {
            rng.random_range(0..len.max(1))
        } else {
            (self.next_outcome(reason) as usize - 1) % len.max(1)
        };
        trace!(index, len, reason, "index chosen");
        index
    }
}
