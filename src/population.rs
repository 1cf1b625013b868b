//! # Population and fitness records
//!
//! A `Population` is the ordered set of hypotheses alive in one generation.
//! The engine never edits a population in place; it builds the next one and
//! swaps it in whole.
//!
//! A `FitnessRecord` holds the scores of one evaluation pass, indexed like the
//! population it was computed from, together with the aggregates gathered in
//! the same pass.

use std::ops::Index;

use crate::error::{GeneticError, OptionExt, Result};
use crate::hypothesis::Hypothesis;
use crate::rng::RandomNumberGenerator;

/// Fitness score produced by an oracle. Higher is better.
pub type Fitness = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    members: Vec<Hypothesis>,
}

impl Population {
    /// Builds `size` random hypotheses of `length` bits each.
    pub fn random(size: usize, length: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            members: (0..size).map(|_| Hypothesis::random(length, rng)).collect(),
        }
    }

    pub fn from_members(members: Vec<Hypothesis>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Hypothesis> {
        self.members.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hypothesis> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[Hypothesis] {
        &self.members
    }

    /// Returns true if some member has exactly the same bits as `hypothesis`.
    pub fn contains(&self, hypothesis: &Hypothesis) -> bool {
        self.members.contains(hypothesis)
    }

    pub fn into_members(self) -> Vec<Hypothesis> {
        self.members
    }
}

impl Index<usize> for Population {
    type Output = Hypothesis;

    fn index(&self, index: usize) -> &Self::Output {
        &self.members[index]
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Hypothesis;
    type IntoIter = std::slice::Iter<'a, Hypothesis>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Scores for one generation plus their single-pass aggregates.
///
/// Negative scores count as zero weight for selection. `selection_total` is
/// the sum of those clamped weights and is what proportional selection divides by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitnessRecord {
    scores: Vec<Fitness>,
    sum: Fitness,
    selection_total: Fitness,
    worst: Fitness,
    best: Fitness,
    best_index: usize,
}

impl FitnessRecord {
    /// Aggregates `scores` in one linear scan.
    ///
    /// Ties for the best score go to the lowest index.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `scores` is empty, and `FitnessOverflow`
    /// if the sum of the scores or of their selection weights does not fit
    /// in a `Fitness`.
    pub fn from_scores(scores: Vec<Fitness>) -> Result<Self> {
        let first = *scores
            .first()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        let mut sum: Fitness = 0;
        let mut selection_total: Fitness = 0;
        let mut worst = first;
        let mut best = first;
        let mut best_index = 0;

        for (index, &score) in scores.iter().enumerate() {
            sum = sum
                .checked_add(score)
                .ok_or_else_genetic(|| GeneticError::FitnessOverflow { index })?;
            selection_total = selection_total
                .checked_add(score.max(0))
                .ok_or_else_genetic(|| GeneticError::FitnessOverflow { index })?;
            if score > best {
                best = score;
                best_index = index;
            }
            if score < worst {
                worst = score;
            }
        }

        Ok(Self {
            scores,
            sum,
            selection_total,
            worst,
            best,
            best_index,
        })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Always false; a record is never built from zero scores.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn scores(&self) -> &[Fitness] {
        &self.scores
    }

    pub fn score(&self, index: usize) -> Option<Fitness> {
        self.scores.get(index).copied()
    }

    /// Selection weight of `index`: its score clamped at zero.
    pub fn weight(&self, index: usize) -> Fitness {
        self.scores.get(index).map_or(0, |&s| s.max(0))
    }

    pub fn sum(&self) -> Fitness {
        self.sum
    }

    pub fn selection_total(&self) -> Fitness {
        self.selection_total
    }

    /// True when no individual carries positive selection weight.
    pub fn is_degenerate(&self) -> bool {
        self.selection_total <= 0
    }

    pub fn worst(&self) -> Fitness {
        self.worst
    }

    pub fn best(&self) -> Fitness {
        self.best
    }

    pub fn best_index(&self) -> usize {
        self.best_index
    }

    /// Mean score truncated toward zero.
    pub fn average(&self) -> Fitness {
        self.sum / self.scores.len() as Fitness
    }
}
