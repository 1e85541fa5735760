//! Collaborator seams for the stage director.
//!
//! The engine itself never performs I/O. Entrant lists and recorded results
//! come in through `RosterProvider`; generated pools, matches, standings and
//! brackets go out through `PersistenceSink`.

use async_trait::async_trait;

use super::errors::DirectorResult;
use crate::bracket::Bracket;
use crate::matches::{EntrantId, Match, StageId};
use crate::ranking::PoolStandings;
use crate::seeding::Pool;

/// Source of entrants and recorded results
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Entrants of a stage in seed order (strongest first)
    async fn entrants(&self, stage_id: StageId) -> DirectorResult<Vec<EntrantId>>;

    /// Matches of a stage that have a recorded final result
    async fn completed_matches(&self, stage_id: StageId) -> DirectorResult<Vec<Match>>;
}

/// Store for generated structures
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    /// Replace the pools of a stage
    async fn store_pools(&self, stage_id: StageId, pools: &[Pool]) -> DirectorResult<()>;

    async fn load_pools(&self, stage_id: StageId) -> DirectorResult<Option<Vec<Pool>>>;

    /// Replace the matches of a stage
    async fn store_matches(&self, stage_id: StageId, matches: &[Match]) -> DirectorResult<()>;

    async fn load_matches(&self, stage_id: StageId) -> DirectorResult<Vec<Match>>;

    /// Replace the standings of a stage
    async fn store_standings(
        &self,
        stage_id: StageId,
        standings: &[PoolStandings],
    ) -> DirectorResult<()>;

    async fn load_standings(&self, stage_id: StageId) -> DirectorResult<Vec<PoolStandings>>;

    /// Replace the bracket of a stage
    async fn store_bracket(&self, stage_id: StageId, bracket: &Bracket) -> DirectorResult<()>;

    async fn load_bracket(&self, stage_id: StageId) -> DirectorResult<Option<Bracket>>;
}
