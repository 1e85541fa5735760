//! Round-robin match generation for pools.

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};

use super::models::{EntrantId, Match, RoundLabel, StageId};
use crate::seeding::Pool;

/// Default spacing between consecutive bouts in a pool
pub const DEFAULT_MATCH_INTERVAL_MINUTES: i64 = 10;

/// Default delay between the start of consecutive pools
pub const DEFAULT_POOL_OFFSET_MINUTES: i64 = 120;

/// Start time and spacing for generated matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: DateTime<Utc>,
    pub interval: Duration,
    /// Added per pool index by `generate_all`
    pub pool_offset: Duration,
}

impl Schedule {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            interval: Duration::minutes(DEFAULT_MATCH_INTERVAL_MINUTES),
            pool_offset: Duration::minutes(DEFAULT_POOL_OFFSET_MINUTES),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_pool_offset(mut self, pool_offset: Duration) -> Self {
        self.pool_offset = pool_offset;
        self
    }

    /// Time of the `k`-th match (0-indexed), `None` past the representable range
    pub fn slot_time(&self, k: usize) -> Option<DateTime<Utc>> {
        i32::try_from(k)
            .ok()
            .and_then(|k| self.interval.checked_mul(k))
            .and_then(|offset| self.start.checked_add_signed(offset))
    }

    /// Schedule for the pool at `pool_index`
    fn for_pool(&self, pool_index: usize) -> Option<Self> {
        let start = i32::try_from(pool_index)
            .ok()
            .and_then(|i| self.pool_offset.checked_mul(i))
            .and_then(|offset| self.start.checked_add_signed(offset))?;
        Some(Self { start, ..*self })
    }
}

/// Pool match generator
pub struct PoolMatchGenerator;

impl PoolMatchGenerator {
    /// Generate every bout of a round robin
    ///
    /// # Arguments
    ///
    /// * `entrants` - Pool members in seed order
    /// * `stage_id` - Stage the matches belong to
    /// * `round` - Round number written into each match label
    /// * `schedule` - Optional start time and interval
    ///
    /// # Returns
    ///
    /// * `Vec<Match>` - `n * (n - 1) / 2` matches in `(i, j)` order with `i < j`;
    ///   empty when fewer than 2 entrants are given
    pub fn generate(
        entrants: &[EntrantId],
        stage_id: StageId,
        round: u32,
        schedule: Option<&Schedule>,
    ) -> Vec<Match> {
        Self::generate_indexed(entrants, stage_id, 0, round, schedule, 0)
    }

    /// Generate the round robin of one seeded pool
    pub fn generate_pool(
        pool: &Pool,
        stage_id: StageId,
        round: u32,
        schedule: Option<&Schedule>,
    ) -> Vec<Match> {
        Self::generate_indexed(&pool.members, stage_id, pool.index, round, schedule, 0)
    }

    /// Generate every pool of a stage
    ///
    /// Match ids run on across pools so the combined list can be addressed by
    /// id. With a schedule, each pool starts `pool_index * pool_offset` after
    /// the stage start. Bouts whose time would not fit a `DateTime` stay
    /// unscheduled.
    pub fn generate_all(
        pools: &[Pool],
        stage_id: StageId,
        round: u32,
        schedule: Option<&Schedule>,
    ) -> Vec<Match> {
        let mut matches = Vec::with_capacity(pools.iter().map(Pool::bout_count).sum());
        for pool in pools {
            let pool_schedule = schedule.and_then(|s| {
                let shifted = s.for_pool(pool.index);
                if shifted.is_none() {
                    warn!("pool {} start is out of range, bouts left unscheduled", pool.index);
                }
                shifted
            });
            let first_id = matches.len();
            matches.extend(Self::generate_indexed(
                &pool.members,
                stage_id,
                pool.index,
                round,
                pool_schedule.as_ref(),
                first_id,
            ));
        }
        matches
    }

    fn generate_indexed(
        entrants: &[EntrantId],
        stage_id: StageId,
        pool_index: usize,
        round: u32,
        schedule: Option<&Schedule>,
        first_id: usize,
    ) -> Vec<Match> {
        let n = entrants.len();
        if n < 2 {
            return Vec::new();
        }

        let mut matches = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let k = matches.len();
                let mut m = Match::pool(
                    first_id + k,
                    stage_id,
                    pool_index,
                    RoundLabel::new(round, k as u32 + 1),
                    entrants[i],
                    entrants[j],
                );
                m.scheduled_at = schedule.and_then(|s| s.slot_time(k));
                matches.push(m);
            }
        }

        debug!(
            "stage {} pool {}: {} bouts for {} entrants",
            stage_id,
            pool_index,
            matches.len(),
            n
        );
        matches
    }
}
