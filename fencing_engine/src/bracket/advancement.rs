//! Moving winners along bracket links.
//!
//! Generation only decides which downstream slot each match feeds. These
//! helpers are what a caller uses after recording a result: the winner is
//! written into that slot, and any match left holding a bye resolves at once.

use log::debug;

use super::models::Bracket;
use crate::errors::{EngineError, EngineResult};
use crate::matches::{Match, MatchId, MatchStatus, Slot};

impl Bracket {
    /// Record a score on an elimination match and advance its winner
    ///
    /// # Returns
    ///
    /// * `EngineResult<Vec<MatchId>>` - IDs of downstream matches resolved by byes
    ///
    /// # Errors
    ///
    /// Everything `Match::record_score` rejects, plus `NoWinner` on a draw
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
        target: u32,
    ) -> EngineResult<Vec<MatchId>> {
        if score_a == score_b {
            return Err(EngineError::InvalidScore(
                "elimination bouts cannot end level".to_string(),
            ));
        }
        self.get_mut(match_id)?.record_score(score_a, score_b, target)?;
        self.advance(match_id)
    }

    /// Write the outcome of a finished match into its downstream slot
    ///
    /// Follows the chain while the receiving match resolves by bye. Advancing
    /// the same match twice is a no-op.
    ///
    /// # Returns
    ///
    /// * `EngineResult<Vec<MatchId>>` - IDs of downstream matches resolved by byes
    pub fn advance(&mut self, match_id: MatchId) -> EngineResult<Vec<MatchId>> {
        let mut resolved = Vec::new();
        let mut current = match_id;

        loop {
            let m = self.get(current)?;
            if !m.is_finished() {
                return Err(EngineError::validation(format!(
                    "match {} ({}) is {}, not finished",
                    m.id, m.label, m.status
                )));
            }
            let Some(link) = m.next() else {
                break;
            };
            let carried = match m.winner {
                Some(winner) => Slot::Real(winner),
                None if m.a.is_bye() && m.b.is_bye() => Slot::Bye,
                None => return Err(EngineError::NoWinner(current)),
            };

            let next = self.get_mut(link.match_id)?;
            if next.slot(link.side) == carried {
                break;
            }
            if next.status != MatchStatus::Scheduled {
                return Err(EngineError::validation(format!(
                    "match {} ({}) is already {}",
                    next.id, next.label, next.status
                )));
            }
            debug!(
                "match {} -> match {} slot {}: {}",
                current, link.match_id, link.side, carried
            );
            *next.slot_mut(link.side) = carried;

            if !resolve_bye(next)? {
                break;
            }
            resolved.push(link.match_id);
            current = link.match_id;
        }

        Ok(resolved)
    }

    /// Advance every round-1 match that was decided by a bye
    pub fn resolve_byes(&mut self) -> EngineResult<Vec<MatchId>> {
        let bye_matches: Vec<MatchId> = self
            .round(1)
            .filter(|m| m.has_bye() && m.is_finished())
            .map(|m| m.id)
            .collect();

        let mut resolved = Vec::new();
        for id in bye_matches {
            resolved.extend(self.advance(id)?);
        }
        Ok(resolved)
    }
}

/// Complete a scheduled match whose slots are a bye and a decided side
fn resolve_bye(m: &mut Match) -> EngineResult<bool> {
    let winner = match (m.a, m.b) {
        (Slot::Real(id), Slot::Bye) | (Slot::Bye, Slot::Real(id)) => Some(id),
        (Slot::Bye, Slot::Bye) => None,
        _ => return Ok(false),
    };
    m.transition(MatchStatus::Completed)?;
    m.winner = winner;
    Ok(true)
}
