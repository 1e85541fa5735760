//! Snake distribution of a seeded roster into pools.

use log::debug;
use std::collections::{BTreeMap, HashSet};

use super::models::{Pool, SeedingSummary};
use crate::config::EngineConfig;
use crate::errors::{EngineError, EngineResult};
use crate::matches::EntrantId;

/// Seeding engine
///
/// Holds validated pool-size settings; every call is a pure function of the
/// entrant ordering it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedingEngine {
    pool_size: usize,
    min_pool_size: usize,
}

impl SeedingEngine {
    /// Create a seeding engine
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `pool_size` is zero
    pub fn new(pool_size: usize, min_pool_size: usize) -> EngineResult<Self> {
        if pool_size < 1 {
            return Err(EngineError::validation("pool size must be at least 1"));
        }
        Ok(Self {
            pool_size,
            min_pool_size,
        })
    }

    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        Self::new(config.pool_size, config.min_pool_size)
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn min_pool_size(&self) -> usize {
        self.min_pool_size
    }

    /// Number of pools for `n` entrants
    ///
    /// Starts from `ceil(n / pool_size)` and drops pools while the average
    /// pool would fall under the minimum size.
    pub fn pool_count(&self, n: usize) -> usize {
        let mut pool_count = n.div_ceil(self.pool_size).max(1);
        while pool_count > 1 && n / pool_count < self.min_pool_size {
            pool_count -= 1;
        }
        pool_count
    }

    /// Seed entrants into pools numbered from 1
    pub fn seed(&self, entrants: &[EntrantId]) -> EngineResult<Vec<Pool>> {
        self.seed_from(entrants, 1)
    }

    /// Seed entrants into pools numbered from `first_pool_number`
    ///
    /// # Arguments
    ///
    /// * `entrants` - Entrant IDs in seed order (position 0 is the top seed)
    /// * `first_pool_number` - Caller-held counter for pool numbering
    ///
    /// # Errors
    ///
    /// Returns `Validation` for fewer than 2 entrants, a repeated entrant, or
    /// pool numbers past `u32::MAX`
    pub fn seed_from(
        &self,
        entrants: &[EntrantId],
        first_pool_number: u32,
    ) -> EngineResult<Vec<Pool>> {
        if entrants.len() < 2 {
            return Err(EngineError::validation(format!(
                "at least 2 entrants required for seeding, got {}",
                entrants.len()
            )));
        }
        let mut seen = HashSet::with_capacity(entrants.len());
        if let Some(dup) = entrants.iter().find(|id| !seen.insert(**id)) {
            return Err(EngineError::validation(format!(
                "entrant {dup} appears more than once in the roster"
            )));
        }

        let pool_count = self.pool_count(entrants.len());
        let pools = snake_distribution(entrants, pool_count)
            .into_iter()
            .enumerate()
            .map(|(index, members)| {
                let number = u32::try_from(index)
                    .ok()
                    .and_then(|offset| first_pool_number.checked_add(offset))
                    .ok_or_else(|| {
                        EngineError::validation(format!(
                            "pool number overflows starting from {first_pool_number}"
                        ))
                    })?;
                Ok(Pool::new(index, number, members, self.min_pool_size))
            })
            .collect::<EngineResult<Vec<Pool>>>()?;

        debug!(
            "seeded {} entrants into {} pools (sizes {:?})",
            entrants.len(),
            pools.len(),
            pools.iter().map(Pool::len).collect::<Vec<_>>()
        );

        Ok(pools)
    }
}

/// Seed entrants into pools in one call
pub fn seed(
    entrants: &[EntrantId],
    pool_size: usize,
    min_pool_size: usize,
) -> EngineResult<Vec<Pool>> {
    SeedingEngine::new(pool_size, min_pool_size)?.seed(entrants)
}

/// Distribute entrants over `pool_count` columns, reversing direction on every other row
///
/// Row 0 goes left to right, row 1 right to left, and so on, so seeds
/// `1..=pool_count` always land in distinct pools.
pub fn snake_distribution(entrants: &[EntrantId], pool_count: usize) -> Vec<Vec<EntrantId>> {
    if pool_count == 0 {
        return Vec::new();
    }
    let mut groups = vec![Vec::new(); pool_count];
    for (i, &entrant) in entrants.iter().enumerate() {
        let mut col = i % pool_count;
        if (i / pool_count) % 2 == 1 {
            col = pool_count - 1 - col;
        }
        groups[col].push(entrant);
    }
    groups
}

/// Pool index of each of the top `pools.len()` seeds, keyed by 1-based seed rank
pub fn seed_placement(entrants: &[EntrantId], pools: &[Pool]) -> BTreeMap<usize, usize> {
    entrants
        .iter()
        .take(pools.len())
        .enumerate()
        .filter_map(|(rank, id)| {
            pools
                .iter()
                .find(|pool| pool.contains(*id))
                .map(|pool| (rank + 1, pool.index))
        })
        .collect()
}

/// Summarize a seeding run
pub fn summarize(entrants: &[EntrantId], pools: &[Pool]) -> SeedingSummary {
    SeedingSummary {
        pool_count: pools.len(),
        pool_sizes: pools.iter().map(Pool::len).collect(),
        seed_placement: seed_placement(entrants, pools),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: i64) -> Vec<EntrantId> {
        (1..=n).collect()
    }

    #[test]
    fn test_snake_eight_into_three() {
        let groups = snake_distribution(&roster(8), 3);
        assert_eq!(groups, vec![vec![1, 6, 7], vec![2, 5, 8], vec![3, 4]]);
    }

    #[test]
    fn test_snake_twenty_four_into_four() {
        let pools = seed(&roster(24), 6, 3).unwrap();
        assert_eq!(pools.len(), 4);
        for pool in &pools {
            assert_eq!(pool.len(), 6);
        }
        assert!(pools[0].contains(1));
        assert!(pools[1].contains(2));
        assert!(pools[2].contains(3));
        assert!(pools[3].contains(4));
        // second row runs backwards
        assert!(pools[3].contains(5));
        assert!(pools[0].contains(8));
    }

    #[test]
    fn test_pool_count_respects_min_size() {
        let engine = SeedingEngine::new(7, 3).unwrap();
        assert_eq!(engine.pool_count(14), 2);
        assert_eq!(engine.pool_count(15), 3);
        // ceil(8/7) = 2 pools of 4 is fine
        assert_eq!(engine.pool_count(8), 2);

        let strict = SeedingEngine::new(2, 4).unwrap();
        // 10 entrants with pool size 2 would be 5 pools of 2; drops to 2 pools of 5
        assert_eq!(strict.pool_count(10), 2);
        assert_eq!(strict.pool_count(3), 1);
    }

    #[test]
    fn test_pool_sizes_differ_by_at_most_one() {
        let pools = seed(&roster(23), 7, 3).unwrap();
        let sizes: Vec<usize> = pools.iter().map(Pool::len).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 23);
        let max = sizes.iter().max().copied().unwrap_or(0);
        let min = sizes.iter().min().copied().unwrap_or(0);
        assert!(max - min <= 1, "sizes {sizes:?}");
    }

    #[test]
    fn test_seed_rejects_small_roster() {
        assert!(matches!(seed(&[1], 7, 3), Err(EngineError::Validation(_))));
        assert!(matches!(seed(&[], 7, 3), Err(EngineError::Validation(_))));
    }

    #[test]
    fn test_seed_rejects_zero_pool_size() {
        assert!(matches!(
            SeedingEngine::new(0, 3),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_seed_rejects_duplicates() {
        let err = seed(&[1, 2, 3, 2], 7, 1).unwrap_err();
        assert!(err.to_string().contains("entrant 2"));
    }

    #[test]
    fn test_huge_min_pool_size_gives_one_pool() {
        let pools = seed(&[1, 2, 3], 1, usize::MAX).unwrap();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].members, vec![1, 2, 3]);
    }

    #[test]
    fn test_seed_from_rejects_number_overflow() {
        let engine = SeedingEngine::new(2, 1).unwrap();
        let pools = engine.seed_from(&roster(2), u32::MAX).unwrap();
        assert_eq!(pools[0].number, u32::MAX);

        let err = engine.seed_from(&roster(4), u32::MAX).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_seed_from_continues_numbering() {
        let engine = SeedingEngine::new(4, 2).unwrap();
        let pools = engine.seed_from(&roster(12), 26).unwrap();
        let letters: Vec<&str> = pools.iter().map(|p| p.letter.as_str()).collect();
        assert_eq!(letters, vec!["Z", "AA", "AB"]);
        assert_eq!(pools[0].number, 26);
        assert_eq!(pools[2].index, 2);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let entrants = vec![42, 7, 19, 3, 88, 61, 5, 14, 30];
        let first = seed(&entrants, 4, 2).unwrap();
        let second = seed(&entrants, 4, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_seed_placement() {
        let entrants = roster(10);
        let pools = seed(&entrants, 5, 3).unwrap();
        let summary = summarize(&entrants, &pools);
        assert_eq!(summary.pool_count, 2);
        assert_eq!(summary.pool_sizes, vec![5, 5]);
        assert_eq!(summary.seed_placement.get(&1), Some(&0));
        assert_eq!(summary.seed_placement.get(&2), Some(&1));
        assert_eq!(summary.seed_placement.len(), 2);
    }
}
