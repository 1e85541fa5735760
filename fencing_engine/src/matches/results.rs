//! Recording results on generated matches.
//!
//! Generators only create matches; everything after that is a status
//! transition driven by the caller. These helpers keep each transition inside
//! the allowed table and keep `winner` consistent with `score`.

use log::debug;

use super::models::{Match, MatchStatus, Score, Side};
use crate::errors::{EngineError, EngineResult};

impl Match {
    /// Move to `next` if the transition table allows it
    pub fn transition(&mut self, next: MatchStatus) -> EngineResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        debug!("match {} ({}): {} -> {}", self.id, self.label, self.status, next);
        self.status = next;
        Ok(())
    }

    /// Scheduled -> InProgress
    pub fn start(&mut self) -> EngineResult<()> {
        self.require_both_entrants()?;
        self.transition(MatchStatus::InProgress)
    }

    /// Cancel a match that has not finished
    pub fn cancel(&mut self) -> EngineResult<()> {
        self.transition(MatchStatus::Cancelled)
    }

    /// Put a cancelled match back on the schedule
    pub fn reschedule(&mut self) -> EngineResult<()> {
        self.transition(MatchStatus::Scheduled)
    }

    /// Record a final score and complete the match
    ///
    /// # Arguments
    ///
    /// * `score_a` - Touches scored by side A
    /// * `score_b` - Touches scored by side B
    /// * `target` - Touches needed to win the bout (5 in pools, 15 in elimination)
    ///
    /// # Errors
    ///
    /// * `InvalidScore` - a score above `target`, or both scores zero
    /// * `Validation` - either slot is a bye or unresolved
    /// * `InvalidTransition` - the match is already finished or cancelled
    ///
    /// Equal scores complete the match without a winner.
    pub fn record_score(&mut self, score_a: u32, score_b: u32, target: u32) -> EngineResult<()> {
        if score_a > target || score_b > target {
            return Err(EngineError::InvalidScore(format!(
                "{score_a}-{score_b} exceeds target score {target}"
            )));
        }
        if score_a == 0 && score_b == 0 {
            return Err(EngineError::InvalidScore(
                "scores cannot both be zero; record a forfeit instead".to_string(),
            ));
        }
        self.require_both_entrants()?;
        self.transition(MatchStatus::Completed)?;

        self.score = Score::new(score_a, score_b);
        self.winner = self.score.leader().and_then(|side| self.slot(side).entrant());
        Ok(())
    }

    /// Award the match to `winner` without a played score
    pub fn record_forfeit(&mut self, winner: Side) -> EngineResult<()> {
        self.require_both_entrants()?;
        self.transition(MatchStatus::Forfeited)?;
        self.winner = self.slot(winner).entrant();
        Ok(())
    }

    /// Side of the recorded winner, if any
    pub fn winning_side(&self) -> Option<Side> {
        let winner = self.winner?;
        if self.a.entrant() == Some(winner) {
            Some(Side::A)
        } else if self.b.entrant() == Some(winner) {
            Some(Side::B)
        } else {
            None
        }
    }

    fn require_both_entrants(&self) -> EngineResult<()> {
        if self.entrants().is_none() {
            return Err(EngineError::validation(format!(
                "match {} ({}) is {} vs {}; both slots need real entrants",
                self.id, self.label, self.a, self.b
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::{RoundLabel, Slot};

    fn bout() -> Match {
        Match::pool(0, 1, 0, RoundLabel::new(1, 1), 101, 102)
    }

    #[test]
    fn test_record_score_sets_winner() {
        let mut m = bout();
        m.record_score(5, 3, 5).unwrap();
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(m.score, Score::new(5, 3));
        assert_eq!(m.winner, Some(101));
        assert_eq!(m.winning_side(), Some(Side::A));
    }

    #[test]
    fn test_record_score_draw_has_no_winner() {
        let mut m = bout();
        m.record_score(4, 4, 5).unwrap();
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(m.winner, None);
        assert_eq!(m.winning_side(), None);
    }

    #[test]
    fn test_record_score_rejects_over_target() {
        let mut m = bout();
        let err = m.record_score(6, 2, 5).unwrap_err();
        assert!(matches!(err, EngineError::InvalidScore(_)));
        assert_eq!(m.status, MatchStatus::Scheduled);
    }

    #[test]
    fn test_record_score_rejects_zero_zero() {
        let mut m = bout();
        assert!(matches!(
            m.record_score(0, 0, 5),
            Err(EngineError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_record_score_twice_fails() {
        let mut m = bout();
        m.record_score(5, 1, 5).unwrap();
        let err = m.record_score(5, 2, 5).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidTransition {
                from: MatchStatus::Completed,
                to: MatchStatus::Completed,
            }
        );
        assert_eq!(m.score, Score::new(5, 1));
    }

    #[test]
    fn test_unresolved_slot_cannot_be_scored() {
        let mut m = Match::elimination(
            3,
            1,
            RoundLabel::new(2, 1),
            Slot::Real(5),
            Slot::Unresolved,
        );
        assert!(matches!(m.record_score(15, 3, 15), Err(EngineError::Validation(_))));
        assert!(matches!(m.start(), Err(EngineError::Validation(_))));
    }

    #[test]
    fn test_forfeit() {
        let mut m = bout();
        m.start().unwrap();
        m.record_forfeit(Side::B).unwrap();
        assert_eq!(m.status, MatchStatus::Forfeited);
        assert_eq!(m.winner, Some(102));
        assert_eq!(m.score, Score::default());
    }

    #[test]
    fn test_cancel_and_reschedule() {
        let mut m = bout();
        m.cancel().unwrap();
        assert!(m.record_score(5, 0, 5).is_err());
        m.reschedule().unwrap();
        m.record_score(5, 0, 5).unwrap();
        assert_eq!(m.winner, Some(101));
    }
}
