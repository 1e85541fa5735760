//! Single-elimination bracket generation.

use log::debug;
use std::collections::HashSet;

use super::models::{Bracket, BracketType};
use crate::errors::{EngineError, EngineResult};
use crate::matches::{
    DownstreamLink, EntrantId, Match, MatchId, MatchStatus, RoundLabel, Side, Slot, StageId,
};

/// Bracket generator
pub struct BracketGenerator;

impl BracketGenerator {
    /// Build the full match tree for a seeded entrant list
    ///
    /// # Arguments
    ///
    /// * `seeded` - Entrant IDs in seed order
    /// * `stage_id` - Stage the matches belong to
    /// * `bracket_type` - Must be `SingleElimination`
    ///
    /// # Returns
    ///
    /// * `EngineResult<Bracket>` - `size - 1` matches over `log2(size)` rounds
    ///
    /// # Errors
    ///
    /// * `Configuration` - unsupported bracket type
    /// * `Validation` - fewer than 2 entrants, or a repeated entrant
    ///
    /// Round 1 pads the list with byes at the tail and pairs slots `(2k, 2k+1)`.
    /// A round-1 match holding a bye is generated already Completed. Later rounds
    /// start with both slots Unresolved; each predecessor pair links to slot A
    /// and slot B of the match it feeds.
    pub fn generate(
        seeded: &[EntrantId],
        stage_id: StageId,
        bracket_type: BracketType,
    ) -> EngineResult<Bracket> {
        if !bracket_type.is_supported() {
            return Err(EngineError::configuration(format!(
                "bracket type {bracket_type} is not supported"
            )));
        }
        if seeded.len() < 2 {
            return Err(EngineError::validation(format!(
                "at least 2 entrants required for a bracket, got {}",
                seeded.len()
            )));
        }
        let mut seen = HashSet::with_capacity(seeded.len());
        if let Some(dup) = seeded.iter().find(|id| !seen.insert(**id)) {
            return Err(EngineError::validation(format!(
                "entrant {dup} is seeded more than once"
            )));
        }

        let size = seeded.len().next_power_of_two();
        let rounds = size.trailing_zeros();

        let slots: Vec<Slot> = seeded
            .iter()
            .map(|id| Slot::Real(*id))
            .chain(std::iter::repeat_n(Slot::Bye, size - seeded.len()))
            .collect();

        let mut matches: Vec<Match> = Vec::with_capacity(size - 1);

        for (k, pair) in slots.chunks_exact(2).enumerate() {
            let id = matches.len();
            let mut m = Match::elimination(
                id,
                stage_id,
                RoundLabel::new(1, k as u32 + 1),
                pair[0],
                pair[1],
            );
            if m.has_bye() {
                m.status = MatchStatus::Completed;
                m.winner = m.a.entrant().or(m.b.entrant());
            }
            matches.push(m);
        }

        let mut previous: Vec<MatchId> = (0..matches.len()).collect();
        let mut round = 1;
        while previous.len() > 1 {
            round += 1;
            let mut current = Vec::with_capacity(previous.len() / 2);
            for (k, pair) in previous.chunks_exact(2).enumerate() {
                let id = matches.len();
                matches.push(Match::elimination(
                    id,
                    stage_id,
                    RoundLabel::new(round, k as u32 + 1),
                    Slot::Unresolved,
                    Slot::Unresolved,
                ));
                matches[pair[0]].set_next(DownstreamLink {
                    match_id: id,
                    side: Side::A,
                });
                matches[pair[1]].set_next(DownstreamLink {
                    match_id: id,
                    side: Side::B,
                });
                current.push(id);
            }
            previous = current;
        }

        debug!(
            "stage {}: bracket of {} for {} entrants, {} matches over {} rounds",
            stage_id,
            size,
            seeded.len(),
            matches.len(),
            rounds
        );

        Ok(Bracket {
            stage_id,
            bracket_type,
            entrant_count: seeded.len(),
            size,
            rounds,
            matches,
        })
    }
}
