//! Direct-elimination bracket models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{EngineError, EngineResult};
use crate::matches::{EntrantId, Match, MatchId, StageId};

/// Elimination format
///
/// Only single elimination is generated; the other variants are accepted as
/// configuration values so callers can store them, and rejected at generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketType {
    SingleElimination,
    DoubleElimination,
    RoundRobinOnly,
}

impl BracketType {
    pub fn is_supported(self) -> bool {
        matches!(self, BracketType::SingleElimination)
    }
}

impl std::fmt::Display for BracketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketType::SingleElimination => write!(f, "single_elimination"),
            BracketType::DoubleElimination => write!(f, "double_elimination"),
            BracketType::RoundRobinOnly => write!(f, "round_robin_only"),
        }
    }
}

impl FromStr for BracketType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "single_elimination" | "single" => Ok(BracketType::SingleElimination),
            "double_elimination" | "double" => Ok(BracketType::DoubleElimination),
            "round_robin_only" => Ok(BracketType::RoundRobinOnly),
            other => Err(EngineError::configuration(format!(
                "unknown bracket type '{other}'"
            ))),
        }
    }
}

/// A generated elimination bracket
///
/// Matches form an arena: `matches[id].id == id`, round 1 first, the final last.
/// Each non-final match links to exactly one slot of one later match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub stage_id: StageId,
    pub bracket_type: BracketType,
    /// Real entrants seeded into round 1
    pub entrant_count: usize,
    /// Round-1 slot count, a power of two
    pub size: usize,
    pub rounds: u32,
    pub matches: Vec<Match>,
}

impl Bracket {
    pub fn get(&self, id: MatchId) -> EngineResult<&Match> {
        self.matches.get(id).ok_or(EngineError::MatchNotFound(id))
    }

    pub fn get_mut(&mut self, id: MatchId) -> EngineResult<&mut Match> {
        self.matches.get_mut(id).ok_or(EngineError::MatchNotFound(id))
    }

    /// Matches of a 1-based round, in position order
    pub fn round(&self, round: u32) -> impl Iterator<Item = &Match> + '_ {
        self.matches.iter().filter(move |m| m.label.round == round)
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.matches.last()
    }

    /// Winner of the final, once it is decided
    pub fn champion(&self) -> Option<EntrantId> {
        self.final_match()
            .filter(|m| m.is_finished())
            .and_then(|m| m.winner)
    }

    /// Conventional name for a round, based on how many entrants it holds
    pub fn round_name(&self, round: u32) -> String {
        if round == 0 || round > self.rounds {
            return format!("Round {round}");
        }
        match self.size >> (round - 1) {
            2 => "Final".to_string(),
            4 => "Semi-final".to_string(),
            8 => "Quarter-final".to_string(),
            n => format!("Table of {n}"),
        }
    }
}
