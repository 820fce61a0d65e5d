//! Deterministic random numbers for loot, spawns and chest contents.
//!
//! [`RngOracle`] is a stateless seed-to-value function. [`RngStream`] layers a
//! cursor on top so callers can draw an ordered sequence of samples, and every
//! consumer in the rules takes `&mut dyn RollSource` so tests can script exact
//! rolls with [`FixedRolls`].
//!
//! Given the same game seed and nonce, a stream produces the same sequence.

use std::collections::VecDeque;

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform sample in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute deterministic seed from game state components.
///
/// * `game_seed` - Base seed set at game start
/// * `nonce` - Turn or event sequence number
/// * `stream` - Which consumer is rolling (see [`RollContext`])
/// * `draw` - Index of the sample within that consumer's sequence
pub fn compute_seed(game_seed: u64, nonce: u64, stream: u32, draw: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (draw as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Consumers that draw from separate streams so one never shifts another's rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Loot = 1,
    /// Level population: fallback species, unknown spawn tags, chest contents.
    Population = 2,
}

/// Ordered source of random samples.
pub trait RollSource {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform value in `[min, max]` inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = f64::from(max - min) + 1.0;
        min + ((self.unit() * span) as u32).min(max - min)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        ((self.unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Cursor over an [`RngOracle`]: seed components fixed, draw index advancing.
#[derive(Clone, Debug)]
pub struct RngStream<R: RngOracle = PcgRng> {
    rng: R,
    game_seed: u64,
    nonce: u64,
    context: RollContext,
    draw: u32,
}

impl RngStream<PcgRng> {
    pub fn new(game_seed: u64, nonce: u64, context: RollContext) -> Self {
        Self::with_oracle(PcgRng, game_seed, nonce, context)
    }
}

impl<R: RngOracle> RngStream<R> {
    pub fn with_oracle(rng: R, game_seed: u64, nonce: u64, context: RollContext) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
            context,
            draw: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.game_seed, self.nonce, self.context as u32, self.draw);
        self.draw = self.draw.wrapping_add(1);
        seed
    }

    /// Samples drawn so far.
    pub fn draws(&self) -> u32 {
        self.draw
    }
}

impl<R: RngOracle> RollSource for RngStream<R> {
    fn unit(&mut self) -> f64 {
        let seed = self.next_seed();
        self.rng.unit(seed)
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        let seed = self.next_seed();
        self.rng.range(seed, min, max)
    }
}

/// Scripted rolls for tests and replays. Once exhausted it keeps returning
/// `fallback`.
#[derive(Clone, Debug, Default)]
pub struct FixedRolls {
    queue: VecDeque<f64>,
    fallback: f64,
}

impl FixedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for FixedRolls {
    fn unit(&mut self) -> f64 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}
