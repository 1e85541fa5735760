//! Stage director running pipeline steps against the roster and the store.

use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;

use super::errors::{DirectorError, DirectorResult};
use super::repository::{PersistenceSink, RosterProvider};
use crate::bracket::{Bracket, BracketGenerator};
use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::matches::{EntrantId, Match, MatchId, PoolMatchGenerator, StageId};
use crate::ranking::{PoolStandings, PromotionSelector, RankingEngine};
use crate::seeding::{Pool, SeedingEngine};

/// Stage director
///
/// Every step computes its whole result before the first write, so a
/// rejected input never leaves partial structures in the store.
pub struct StageDirector<R, S> {
    roster: Arc<R>,
    sink: Arc<S>,
    config: EngineConfig,
}

impl<R: RosterProvider, S: PersistenceSink> StageDirector<R, S> {
    /// Create a director with a validated configuration
    pub fn new(roster: Arc<R>, sink: Arc<S>, config: EngineConfig) -> DirectorResult<Self> {
        config.validate()?;
        Ok(Self {
            roster,
            sink,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed a stage's roster into pools and store the pools and their bouts
    ///
    /// # Arguments
    ///
    /// * `stage_id` - Pool stage to seed
    /// * `start` - Start of the first pool, or `None` to leave bouts unscheduled
    ///
    /// # Returns
    ///
    /// * `DirectorResult<Vec<Pool>>` - The stored pools
    pub async fn seed_pool_stage(
        &self,
        stage_id: StageId,
        start: Option<DateTime<Utc>>,
    ) -> DirectorResult<Vec<Pool>> {
        let entrants = self.roster.entrants(stage_id).await?;
        let pools = SeedingEngine::from_config(&self.config)?.seed(&entrants)?;
        let schedule = start.map(|s| self.config.schedule(s)).transpose()?;
        let matches = PoolMatchGenerator::generate_all(&pools, stage_id, 1, schedule.as_ref());

        self.sink.store_pools(stage_id, &pools).await?;
        self.sink.store_matches(stage_id, &matches).await?;

        info!(
            "Stage {}: seeded {} entrants into {} pools, {} bouts",
            stage_id,
            entrants.len(),
            pools.len(),
            matches.len()
        );
        Ok(pools)
    }

    /// Record the score of a pool bout
    pub async fn record_pool_result(
        &self,
        stage_id: StageId,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
    ) -> DirectorResult<Match> {
        let mut matches = self.sink.load_matches(stage_id).await?;
        let m = matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(EngineError::MatchNotFound(match_id))?;
        m.record_score(score_a, score_b, self.config.pool_target_score)?;
        let recorded = m.clone();

        self.sink.store_matches(stage_id, &matches).await?;
        info!(
            "Stage {}: bout {} recorded {}-{}",
            stage_id, match_id, score_a, score_b
        );
        Ok(recorded)
    }

    /// Rank every pool of a stage and select the qualifiers
    ///
    /// Standings are stored with the qualified flag set on the top
    /// `promotion_count` of each pool.
    pub async fn close_pool_stage(&self, stage_id: StageId) -> DirectorResult<Vec<EntrantId>> {
        let pools = self
            .sink
            .load_pools(stage_id)
            .await?
            .ok_or(DirectorError::StageNotFound(stage_id))?;
        let matches = self.roster.completed_matches(stage_id).await?;

        let k = self.config.promotion_count;
        let mut standings: Vec<PoolStandings> = RankingEngine::rank_pools(&pools, &matches);
        PromotionSelector::flag_qualifiers(&mut standings, k)?;
        let qualifiers = PromotionSelector::promote(&standings, k)?;

        self.sink.store_standings(stage_id, &standings).await?;
        info!(
            "Stage {}: {} completed bouts ranked, {} qualifiers",
            stage_id,
            matches.len(),
            qualifiers.len()
        );
        Ok(qualifiers)
    }

    /// Generate and store the elimination bracket for a list of qualifiers
    ///
    /// Round-1 byes are advanced before the bracket is stored.
    pub async fn build_elimination(
        &self,
        stage_id: StageId,
        qualifiers: &[EntrantId],
    ) -> DirectorResult<Bracket> {
        let mut bracket = BracketGenerator::generate(qualifiers, stage_id, self.config.bracket_type)?;
        let resolved = bracket.resolve_byes()?;

        self.sink.store_bracket(stage_id, &bracket).await?;
        info!(
            "Stage {}: bracket of {} for {} qualifiers ({} later matches resolved by byes)",
            stage_id,
            bracket.size,
            qualifiers.len(),
            resolved.len()
        );
        Ok(bracket)
    }

    /// Record an elimination result and advance the winner
    pub async fn record_bracket_result(
        &self,
        stage_id: StageId,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
    ) -> DirectorResult<Bracket> {
        let mut bracket = self
            .sink
            .load_bracket(stage_id)
            .await?
            .ok_or(DirectorError::StageNotFound(stage_id))?;
        bracket.record_result(
            match_id,
            score_a,
            score_b,
            self.config.elimination_target_score,
        )?;

        self.sink.store_bracket(stage_id, &bracket).await?;
        match bracket.champion() {
            Some(champion) => info!("Stage {}: final decided, champion #{}", stage_id, champion),
            None => info!(
                "Stage {}: match {} recorded {}-{}",
                stage_id, match_id, score_a, score_b
            ),
        }
        Ok(bracket)
    }
}
