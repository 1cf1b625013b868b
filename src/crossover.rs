//! # Crossover
//!
//! Uniform crossover driven by a bit mask. Where the mask holds a 1 the first
//! child copies the first parent and the second child copies the second
//! parent; where it holds a 0 the roles swap.
//!
//! ## Example
//!
//! ```rust
//! use bitga::crossover::{CrossoverMask, CrossoverOperator};
//! use bitga::hypothesis::Hypothesis;
//!
//! let operator = CrossoverOperator::with_mask("1100".parse().unwrap());
//! let p1: Hypothesis = "1111".parse().unwrap();
//! let p2: Hypothesis = "0000".parse().unwrap();
//!
//! let (c1, c2) = operator.recombine(&p1, &p2).unwrap();
//! assert_eq!(c1.to_string(), "1100");
//! assert_eq!(c2.to_string(), "0011");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{GeneticError, Result};
use crate::hypothesis::Hypothesis;
use crate::rng::RandomNumberGenerator;

/// How an operator sources its mask across calls.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskPolicy {
    /// One mask is drawn up front and reused for every recombination.
    #[default]
    Retained,
    /// A fresh random mask is drawn before every recombination.
    FreshPerCall,
}

/// An immutable crossover mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossoverMask {
    bits: Vec<bool>,
}

impl CrossoverMask {
    /// Builds a mask with every position drawn independently and uniformly.
    pub fn random(length: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            bits: rng.gen_bits(length),
        }
    }

    /// Wraps an explicit mask.
    pub fn fixed(bits: Vec<bool>) -> Self {
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

    /// Bitwise NOT of this mask.
    pub fn complement(&self) -> Self {
        Self {
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }
}

impl fmt::Display for CrossoverMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for CrossoverMask {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        let h: Hypothesis = s.parse()?;
        Ok(Self::fixed(h.bits().to_vec()))
    }
}

/// Recombines pairs of hypotheses under a mask.
#[derive(Debug, Clone)]
pub struct CrossoverOperator {
    mask: CrossoverMask,
    policy: MaskPolicy,
}

impl CrossoverOperator {
    /// Creates an operator with a random mask of `length` bits.
    pub fn new(length: usize, policy: MaskPolicy, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            mask: CrossoverMask::random(length, rng),
            policy,
        }
    }

    /// Creates an operator that always uses `mask`.
    pub fn with_mask(mask: CrossoverMask) -> Self {
        Self {
            mask,
            policy: MaskPolicy::Retained,
        }
    }

    pub fn mask(&self) -> &CrossoverMask {
        &self.mask
    }

    pub fn policy(&self) -> MaskPolicy {
        self.policy
    }

    /// Produces two children from `h1` and `h2` under the current mask.
    ///
    /// Parents are left untouched and the children own fresh storage.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` unless both parents are exactly as long as the mask.
    pub fn recombine(&self, h1: &Hypothesis, h2: &Hypothesis) -> Result<(Hypothesis, Hypothesis)> {
        let expected = self.mask.len();
        for parent in [h1, h2] {
            if parent.len() != expected {
                return Err(GeneticError::LengthMismatch {
                    expected,
                    actual: parent.len(),
                });
            }
        }

        let (child1, child2): (Vec<bool>, Vec<bool>) = self
            .mask
            .bits()
            .iter()
            .zip(h1.bits().iter().zip(h2.bits()))
            .map(|(&m, (&a, &b))| if m { (a, b) } else { (b, a) })
            .unzip();

        Ok((Hypothesis::from_bits(child1), Hypothesis::from_bits(child2)))
    }

    /// Recombines according to the operator's policy, drawing a new mask
    /// first when the policy asks for one per call.
    pub fn recombine_next(
        &mut self,
        h1: &Hypothesis,
        h2: &Hypothesis,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Hypothesis, Hypothesis)> {
        if self.policy == MaskPolicy::FreshPerCall {
            self.mask = CrossoverMask::random(self.mask.len(), rng);
        }
        self.recombine(h1, h2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Hypothesis {
        s.parse().unwrap()
    }

    #[test]
    fn test_children_follow_mask() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let operator = CrossoverOperator::new(42, MaskPolicy::Retained, &mut rng);
        let h1 = Hypothesis::random(42, &mut rng);
        let h2 = Hypothesis::random(42, &mut rng);

        let (c1, c2) = operator.recombine(&h1, &h2).unwrap();
        for i in 0..42 {
            let m = operator.mask().bits()[i];
            let (a, b) = (h1.bits()[i], h2.bits()[i]);
            assert_eq!(c1.bits()[i], if m { a } else { b });
            assert_eq!(c2.bits()[i], if m { b } else { a });

            let mut pair = [c1.bits()[i], c2.bits()[i]];
            let mut parents = [a, b];
            pair.sort();
            parents.sort();
            assert_eq!(pair, parents);
        }
    }

    #[test]
    fn test_complement_mask_swaps_children() {
        let mask: CrossoverMask = "1010011".parse().unwrap();
        let h1 = parse("1110001");
        let h2 = parse("0011110");

        let (a1, a2) = CrossoverOperator::with_mask(mask.clone())
            .recombine(&h1, &h2)
            .unwrap();
        let (b1, b2) = CrossoverOperator::with_mask(mask.complement())
            .recombine(&h1, &h2)
            .unwrap();

        assert_eq!(a1, b2);
        assert_eq!(a2, b1);
    }

    #[test]
    fn test_parents_are_untouched() {
        let operator = CrossoverOperator::with_mask("0101".parse().unwrap());
        let h1 = parse("1111");
        let h2 = parse("0000");

        let (c1, c2) = operator.recombine(&h1, &h2).unwrap();
        assert_eq!(h1.to_string(), "1111");
        assert_eq!(h2.to_string(), "0000");
        assert_eq!(c1.to_string(), "0101");
        assert_eq!(c2.to_string(), "1010");
    }

    #[test]
    fn test_length_mismatch() {
        let operator = CrossoverOperator::with_mask("0101".parse().unwrap());
        let result = operator.recombine(&parse("1111"), &parse("000"));

        match result {
            Err(GeneticError::LengthMismatch { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("Expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_retained_mask_is_reused() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let mut operator = CrossoverOperator::new(16, MaskPolicy::Retained, &mut rng);
        let before = operator.mask().clone();
        let h1 = Hypothesis::random(16, &mut rng);
        let h2 = Hypothesis::random(16, &mut rng);

        for _ in 0..10 {
            operator.recombine_next(&h1, &h2, &mut rng).unwrap();
        }
        assert_eq!(operator.mask(), &before);
    }

    #[test]
    fn test_fresh_mask_per_call() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let mut operator = CrossoverOperator::new(64, MaskPolicy::FreshPerCall, &mut rng);
        let first = operator.mask().clone();
        let h1 = Hypothesis::random(64, &mut rng);
        let h2 = Hypothesis::random(64, &mut rng);

        operator.recombine_next(&h1, &h2, &mut rng).unwrap();
        assert_eq!(operator.mask().len(), 64);
        assert_ne!(operator.mask(), &first);
    }
}
