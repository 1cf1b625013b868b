//! # Hypothesis
//!
//! A `Hypothesis` is one candidate solution: a bit vector whose length is
//! fixed when it is built. The only in-place change it supports is mutation,
//! which flips exactly one uniformly chosen bit.
//!
//! ## Example
//!
//! ```rust
//! use bitga::hypothesis::Hypothesis;
//! use bitga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let mut h: Hypothesis = "0000".parse().unwrap();
//! h.mutate(&mut rng);
//!
//! assert_eq!(h.len(), 4);
//! assert_eq!(h.count_ones(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::GeneticError;
use crate::rng::RandomNumberGenerator;

/// A fixed-length bitstring individual.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hypothesis {
    bits: Vec<bool>,
}

impl Hypothesis {
    /// Builds a hypothesis of `length` bits, each drawn independently with
    /// equal probability of 0 and 1.
    pub fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            bits: rng.gen_bits(length),
        }
    }

    /// Wraps an explicit bit sequence. The vector is moved in, never copied.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns the bit at `index`, or `None` past the end.
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Flips one bit chosen uniformly from `[0, len)`.
    ///
    /// A zero-length hypothesis has nothing to flip and is left untouched;
    /// run configurations never produce one.
    pub fn mutate(&mut self, rng: &mut RandomNumberGenerator) {
        if self.bits.is_empty() {
            return;
        }
        let index = rng.gen_index(self.bits.len());
        self.bits[index] = !self.bits[index];
    }

    /// Reads `width` bits starting at `offset` as a big-endian unsigned value.
    ///
    /// Returns `None` if the block runs past the end or is wider than 64 bits.
    pub fn decode_block(&self, offset: usize, width: usize) -> Option<u64> {
        if width > 64 {
            return None;
        }
        let block = self.bits.get(offset..offset.checked_add(width)?)?;
        Some(block.iter().fold(0u64, |acc, &b| (acc << 1) | u64::from(b)))
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Hypothesis {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GeneticError::Other(format!(
                    "invalid bit character '{}' in \"{}\"",
                    other, s
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_bits)
    }
}
