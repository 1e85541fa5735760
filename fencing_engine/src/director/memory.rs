//! In-memory roster and store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::errors::{DirectorError, DirectorResult};
use super::repository::{PersistenceSink, RosterProvider};
use crate::bracket::Bracket;
use crate::matches::{EntrantId, Match, MatchStatus, StageId};
use crate::ranking::PoolStandings;
use crate::seeding::Pool;

/// Everything a `MemoryStore` holds, keyed by stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreState {
    pub rosters: BTreeMap<StageId, Vec<EntrantId>>,
    pub pools: BTreeMap<StageId, Vec<Pool>>,
    pub matches: BTreeMap<StageId, Vec<Match>>,
    pub standings: BTreeMap<StageId, Vec<PoolStandings>>,
    pub brackets: BTreeMap<StageId, Bracket>,
}

/// Roster provider and persistence sink backed by process memory
///
/// The whole state can be written to and read from JSON, which is how the
/// command-line front end keeps an event between runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Register the entrants of a stage in seed order
    pub fn with_roster(mut self, stage_id: StageId, entrants: Vec<EntrantId>) -> Self {
        self.state.get_mut().rosters.insert(stage_id, entrants);
        self
    }

    pub async fn set_roster(&self, stage_id: StageId, entrants: Vec<EntrantId>) {
        self.state.write().await.rosters.insert(stage_id, entrants);
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    pub async fn to_json(&self) -> DirectorResult<String> {
        let state = self.state.read().await;
        Ok(serde_json::to_string_pretty(&*state)?)
    }

    pub fn from_json(json: &str) -> DirectorResult<Self> {
        let state: StoreState = serde_json::from_str(json)?;
        Ok(Self::from_state(state))
    }
}

#[async_trait]
impl RosterProvider for MemoryStore {
    async fn entrants(&self, stage_id: StageId) -> DirectorResult<Vec<EntrantId>> {
        self.state
            .read()
            .await
            .rosters
            .get(&stage_id)
            .cloned()
            .ok_or(DirectorError::StageNotFound(stage_id))
    }

    async fn completed_matches(&self, stage_id: StageId) -> DirectorResult<Vec<Match>> {
        let state = self.state.read().await;
        Ok(state
            .matches
            .get(&stage_id)
            .map(|matches| {
                matches
                    .iter()
                    .filter(|m| m.status == MatchStatus::Completed)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl PersistenceSink for MemoryStore {
    async fn store_pools(&self, stage_id: StageId, pools: &[Pool]) -> DirectorResult<()> {
        self.state
            .write()
            .await
            .pools
            .insert(stage_id, pools.to_vec());
        Ok(())
    }

    async fn load_pools(&self, stage_id: StageId) -> DirectorResult<Option<Vec<Pool>>> {
        Ok(self.state.read().await.pools.get(&stage_id).cloned())
    }

    async fn store_matches(&self, stage_id: StageId, matches: &[Match]) -> DirectorResult<()> {
        self.state
            .write()
            .await
            .matches
            .insert(stage_id, matches.to_vec());
        Ok(())
    }

    async fn load_matches(&self, stage_id: StageId) -> DirectorResult<Vec<Match>> {
        self.state
            .read()
            .await
            .matches
            .get(&stage_id)
            .cloned()
            .ok_or(DirectorError::StageNotFound(stage_id))
    }

    async fn store_standings(
        &self,
        stage_id: StageId,
        standings: &[PoolStandings],
    ) -> DirectorResult<()> {
        self.state
            .write()
            .await
            .standings
            .insert(stage_id, standings.to_vec());
        Ok(())
    }

    async fn load_standings(&self, stage_id: StageId) -> DirectorResult<Vec<PoolStandings>> {
        Ok(self
            .state
            .read()
            .await
            .standings
            .get(&stage_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn store_bracket(&self, stage_id: StageId, bracket: &Bracket) -> DirectorResult<()> {
        self.state
            .write()
            .await
            .brackets
            .insert(stage_id, bracket.clone());
        Ok(())
    }

    async fn load_bracket(&self, stage_id: StageId) -> DirectorResult<Option<Bracket>> {
        Ok(self.state.read().await.brackets.get(&stage_id).cloned())
    }
}
