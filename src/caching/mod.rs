//! # Caching Module
//!
//! Memoizing wrappers for fitness oracles. Selection fill and elitism copy
//! hypotheses verbatim into the next generation, so the same bits are often
//! scored many times over a run; these wrappers score each distinct
//! bitstring once.
//!
//! Only successful scores are cached. An oracle error is passed through and
//! the next request for the same bits asks the oracle again.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::evolution::FitnessOracle;
use crate::hypothesis::Hypothesis;
use crate::population::Fitness;

type ScoreMap = HashMap<Hypothesis, Fitness>;

/// A wrapper around an oracle that caches scores in one shared map.
///
/// Clones share the same cache.
#[derive(Debug, Clone)]
pub struct CachedOracle<O>
where
    O: FitnessOracle,
{
    /// The wrapped oracle
    oracle: O,
    cache: Arc<Mutex<ScoreMap>>,
}

impl<O> CachedOracle<O>
where
    O: FitnessOracle,
{
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a new cached oracle with a pre-populated cache.
    pub fn with_cache(oracle: O, cache: HashMap<Hypothesis, Fitness>) -> Self {
        Self {
            oracle,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn inner(&self) -> &O {
        &self.oracle
    }

    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<Hypothesis, Fitness> {
        self.lock().clone()
    }

    // A panic inside another scorer cannot leave the map half-written, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ScoreMap> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O> FitnessOracle for CachedOracle<O>
where
    O: FitnessOracle,
{
    fn score(&self, hypothesis: &Hypothesis) -> Result<Fitness> {
        if let Some(&score) = self.lock().get(hypothesis) {
            return Ok(score);
        }

        // Scored outside the lock so parallel workers are not serialized.
        let score = self.oracle.score(hypothesis)?;
        self.lock().insert(hypothesis.clone(), score);
        Ok(score)
    }
}

/// A per-thread score cache.
#[derive(Debug, Default)]
pub struct ThreadLocalCache {
    cache: thread_local::ThreadLocal<RefCell<ScoreMap>>,
}

impl ThreadLocalCache {
    pub fn new() -> Self {
        Self {
            cache: thread_local::ThreadLocal::new(),
        }
    }

    /// Gets a cached score for the current thread, if any.
    pub fn get(&self, key: &Hypothesis) -> Option<Fitness> {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .and_then(|cache| cache.get(key).copied())
    }

    pub fn insert(&self, key: Hypothesis, value: Fitness) {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));
        if let Ok(mut cache) = cell.try_borrow_mut() {
            cache.insert(key, value);
        }
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }

    /// Number of cached scores on the current thread.
    pub fn len(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A wrapper around an oracle that keeps one cache per thread.
///
/// Clones share the per-thread caches.
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedOracle<O>
where
    O: FitnessOracle,
{
    oracle: O,
    cache: Arc<ThreadLocalCache>,
}

impl<O> ThreadLocalCachedOracle<O>
where
    O: FitnessOracle,
{
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            cache: Arc::new(ThreadLocalCache::new()),
        }
    }

    pub fn inner(&self) -> &O {
        &self.oracle
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached scores on the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<O> FitnessOracle for ThreadLocalCachedOracle<O>
where
    O: FitnessOracle,
{
    fn score(&self, hypothesis: &Hypothesis) -> Result<Fitness> {
        if let Some(score) = self.cache.get(hypothesis) {
            return Ok(score);
        }

        let score = self.oracle.score(hypothesis)?;
        self.cache.insert(hypothesis.clone(), score);
        Ok(score)
    }
}
