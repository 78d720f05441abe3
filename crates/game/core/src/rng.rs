//! Deterministic random number sources for combat and capture rolls.
//!
//! Every resolution call receives its RNG explicitly. Nothing in this crate
//! reaches for an ambient random source, so identical inputs and identical
//! RNG state always produce identical outcomes.
//!
//! # Determinism
//!
//! All sources must be deterministic: given the same seed they produce the
//! same sequence. Replays re-derive per-action seeds with [`compute_seed`].

use std::collections::VecDeque;

/// Source of random rolls consumed by the resolvers.
///
/// Implementations only provide [`next_u32`](RngSource::next_u32); the
/// derived helpers define how a raw draw maps onto probabilities so that
/// every source consumes exactly one draw per roll.
pub trait RngSource {
    /// Draw the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Draw a value uniformly distributed in `[0, 1)`.
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Roll once against `probability`.
    ///
    /// Always consumes exactly one draw, even when the outcome is certain,
    /// so the stream position never depends on the probability value.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Draw an index in `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            let _ = self.next_u32();
            return 0;
        }
        (u64::from(self.next_u32()) * bound) >> 32
    }
}

impl<R: RngSource + ?Sized> RngSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output. The generator keeps
/// its state between draws and counts how many draws were taken, which lets
/// tests assert that rejected actions consumed nothing.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
    draws: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator positioned at `seed`.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed,
            draws: 0,
        }
    }

    /// Creates a generator for one roll context of one action.
    ///
    /// See [`compute_seed`] for the meaning of each component.
    pub fn for_action(world_seed: u64, nonce: u64, actor: u32, context: u32) -> Self {
        Self::new(compute_seed(world_seed, nonce, actor, context))
    }

    /// Number of draws taken from this generator so far.
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        self.draws += 1;
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed list of unit rolls.
///
/// Useful for fixtures that need a specific crit or counter outcome. Once
/// the script runs out, every further roll returns `0.999…` (a failed
/// roll for any probability below 1).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedRng {
    rolls: VecDeque<u32>,
    draws: u64,
}

impl ScriptedRng {
    /// Creates a source returning the given unit values in order.
    ///
    /// Values are clamped into `[0, 1)`.
    pub fn from_units(units: &[f64]) -> Self {
        let rolls = units
            .iter()
            .map(|unit| {
                let clamped = unit.clamp(0.0, 1.0);
                let scaled = clamped * (f64::from(u32::MAX) + 1.0);
                if scaled >= f64::from(u32::MAX) {
                    u32::MAX
                } else {
                    scaled as u32
                }
            })
            .collect();
        Self { rolls, draws: 0 }
    }

    /// Number of draws taken so far.
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Rolls left in the script.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RngSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.rolls.pop_front().unwrap_or(u32::MAX)
    }
}

/// Compute a deterministic seed from world and action components.
///
/// # Arguments
///
/// * `world_seed` - Seed fixed when the world session starts
/// * `nonce` - Action sequence number within the world
/// * `actor` - Entity performing the action
/// * `context` - Distinguishes independent roll streams of one action
///
/// # Context Values
///
/// - `0`: combat rolls (critical, counter)
/// - `1`: capture roll
/// - `2`: curse selection
pub fn compute_seed(world_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing constants
    let mut hash = world_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
