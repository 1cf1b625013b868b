//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness the
//! engine threads through initialization, crossover masks, selection and
//! mutation. Seeding it makes a whole run reproducible.
//!
//! ## Example
//!
//! ```rust
//! use bitga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let bit = rng.gen_bit();
//! let index = rng.gen_index(10);
//! let p = rng.gen_probability();
//!
//! assert!(index < 10);
//! assert!((0.0..1.0).contains(&p));
//! let _ = bit;
//! ```
//!
//! ## Thread-local RNG
//!
//! Fitness oracles only get `&self`, and may be called from several rayon
//! workers at once. Those that need randomness use `ThreadLocalRng`:
//!
//! ```rust
//! use bitga::rng::ThreadLocalRng;
//!
//! let noise: f64 = ThreadLocalRng::gen_range(-5.0..5.0);
//! assert!((-5.0..5.0).contains(&noise));
//! ```

use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};

/// A thread-local random number generator that can be used without synchronization.
///
/// It uses the built-in `ThreadRng` from the `rand` crate, which is automatically
/// seeded from the system entropy. Values drawn from it are never reproducible.
pub struct ThreadLocalRng;

impl ThreadLocalRng {
    /// Generates a random number in the given range.
    pub fn gen_range<T, R>(range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        thread_rng().gen_range(range)
    }
}

/// A wrapper around the `rand` crate's `StdRng` exposing the draws the
/// engine needs.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// Two generators built from the same seed produce the same sequence, which
    /// is what makes seeded runs bit-identical.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a single bit, 0 and 1 with equal probability.
    pub fn gen_bit(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Draws `len` independent uniform bits.
    pub fn gen_bits(&mut self, len: usize) -> Vec<bool> {
        (0..len).map(|_| self.gen_bit()).collect()
    }

    /// Draws an index uniformly from `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero. Callers guarantee a non-empty range.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Draws a uniform number in `[0, 1)`.
    pub fn gen_probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
