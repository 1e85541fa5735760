//! Qualifier selection across pools.

use log::debug;

use super::standings::PoolStandings;
use crate::errors::{EngineError, EngineResult};
use crate::matches::EntrantId;

/// Promotion selector
pub struct PromotionSelector;

impl PromotionSelector {
    /// Top `k` of every pool, concatenated in pool order
    ///
    /// Qualifiers are not re-seeded across pools: the second of pool A always
    /// precedes the first of pool B. Pools with fewer than `k` entries give
    /// everything they have.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `k` is zero
    pub fn promote(pool_standings: &[PoolStandings], k: usize) -> EngineResult<Vec<EntrantId>> {
        if k == 0 {
            return Err(EngineError::validation("promotion count must be positive"));
        }
        let qualifiers: Vec<EntrantId> = pool_standings
            .iter()
            .flat_map(|pool| pool.top(k).iter().map(|s| s.entrant))
            .collect();

        debug!(
            "promoted {} entrants from {} pools (top {} each)",
            qualifiers.len(),
            pool_standings.len(),
            k
        );
        Ok(qualifiers)
    }

    /// Mark the top `k` of each pool as qualified and clear the flag on the rest
    pub fn flag_qualifiers(pool_standings: &mut [PoolStandings], k: usize) -> EngineResult<()> {
        if k == 0 {
            return Err(EngineError::validation("promotion count must be positive"));
        }
        for pool in pool_standings.iter_mut() {
            for (i, standing) in pool.standings.iter_mut().enumerate() {
                standing.qualified = i < k;
            }
        }
        Ok(())
    }
}
