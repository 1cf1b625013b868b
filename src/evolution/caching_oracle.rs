use crate::caching::{CachedOracle, ThreadLocalCachedOracle};

use super::FitnessOracle;

/// Trait for wrapping an oracle with a score cache.
///
/// Only deterministic oracles should be cached: a noisy oracle would have its
/// first draw frozen for every later copy of the same bits.
pub trait CachingOracle: FitnessOracle + Sized + Clone {
    /// Wraps this oracle in a `CachedOracle`, which uses a mutex-protected
    /// cache shared across all threads and clones.
    ///
    /// # Example
    ///
    /// ```
    /// use bitga::evolution::{CachingOracle, FitnessOracle};
    /// use bitga::fitness::TargetOracle;
    /// use bitga::hypothesis::Hypothesis;
    /// use bitga::rng::RandomNumberGenerator;
    ///
    /// let oracle = TargetOracle::default().with_global_cache();
    /// let h = Hypothesis::random(42, &mut RandomNumberGenerator::from_seed(1));
    ///
    /// let first = oracle.score(&h).unwrap();
    /// assert_eq!(oracle.score(&h).unwrap(), first);
    /// assert_eq!(oracle.cache_size(), 1);
    /// ```
    fn with_global_cache(&self) -> CachedOracle<Self>;

    /// Wraps this oracle in a `ThreadLocalCachedOracle`, which keeps a
    /// separate cache per thread to avoid mutex contention.
    fn with_thread_local_cache(&self) -> ThreadLocalCachedOracle<Self>;
}

impl<O> CachingOracle for O
where
    O: FitnessOracle + Clone,
{
    fn with_global_cache(&self) -> CachedOracle<Self> {
        CachedOracle::new(self.clone())
    }

    fn with_thread_local_cache(&self) -> ThreadLocalCachedOracle<Self> {
        ThreadLocalCachedOracle::new(self.clone())
    }
}
