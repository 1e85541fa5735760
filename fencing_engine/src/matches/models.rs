//! Match data models shared by pool and elimination rounds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entrant ID type, owned by the roster provider
pub type EntrantId = i64;

/// Stage ID type
pub type StageId = i64;

/// Match ID type: index of the match in the list a generator returned
pub type MatchId = usize;

/// Content of one participant slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "entrant")]
pub enum Slot {
    /// A real entrant
    Real(EntrantId),
    /// Unfilled bracket position, awarded to the opponent
    Bye,
    /// Waiting on the winner of a predecessor match
    Unresolved,
}

impl Slot {
    /// Entrant in this slot, if it holds a real one
    pub fn entrant(&self) -> Option<EntrantId> {
        match self {
            Slot::Real(id) => Some(*id),
            Slot::Bye | Slot::Unresolved => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Slot::Unresolved)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Real(id) => write!(f, "#{id}"),
            Slot::Bye => write!(f, "BYE"),
            Slot::Unresolved => write!(f, "TBD"),
        }
    }
}

/// Side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Downstream slot a bracket match's winner feeds into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownstreamLink {
    pub match_id: MatchId,
    pub side: Side,
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    Forfeited,
    Cancelled,
}

impl MatchStatus {
    /// Whether the transition table allows moving to `next`
    pub fn can_transition_to(self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        matches!(
            (self, next),
            (Scheduled, InProgress)
                | (Scheduled, Completed)
                | (Scheduled, Forfeited)
                | (Scheduled, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Forfeited)
                | (InProgress, Cancelled)
                | (Cancelled, Scheduled)
        )
    }

    /// Completed and Forfeited matches have a final outcome
    pub fn is_final(self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Forfeited)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::InProgress => write!(f, "in_progress"),
            MatchStatus::Completed => write!(f, "completed"),
            MatchStatus::Forfeited => write!(f, "forfeited"),
            MatchStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Touches scored by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub a: u32,
    pub b: u32,
}

impl Score {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Side with the higher score, `None` on a draw
    pub fn leader(&self) -> Option<Side> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Round and 1-based position of a match within its round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundLabel {
    pub round: u32,
    pub position: u32,
}

impl RoundLabel {
    pub fn new(round: u32, position: u32) -> Self {
        Self { round, position }
    }
}

impl std::fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "round{}_match{}", self.round, self.position)
    }
}

/// Stage-specific part of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum MatchPhase {
    /// Round-robin bout inside a pool
    Pool { pool_index: usize },
    /// Direct-elimination bout; `next` is `None` only for the final
    Elimination { next: Option<DownstreamLink> },
}

/// A pool or elimination match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub stage_id: StageId,
    pub a: Slot,
    pub b: Slot,
    pub status: MatchStatus,
    pub score: Score,
    pub label: RoundLabel,
    pub phase: MatchPhase,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Set once the match is Completed or Forfeited with a decisive outcome
    pub winner: Option<EntrantId>,
}

impl Match {
    /// Create a scheduled pool match between two entrants
    pub fn pool(
        id: MatchId,
        stage_id: StageId,
        pool_index: usize,
        label: RoundLabel,
        a: EntrantId,
        b: EntrantId,
    ) -> Self {
        Self {
            id,
            stage_id,
            a: Slot::Real(a),
            b: Slot::Real(b),
            status: MatchStatus::Scheduled,
            score: Score::default(),
            label,
            phase: MatchPhase::Pool { pool_index },
            scheduled_at: None,
            winner: None,
        }
    }

    /// Create a scheduled elimination match with no downstream link yet
    pub fn elimination(id: MatchId, stage_id: StageId, label: RoundLabel, a: Slot, b: Slot) -> Self {
        Self {
            id,
            stage_id,
            a,
            b,
            status: MatchStatus::Scheduled,
            score: Score::default(),
            label,
            phase: MatchPhase::Elimination { next: None },
            scheduled_at: None,
            winner: None,
        }
    }

    pub fn slot(&self, side: Side) -> Slot {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Both real entrants, if neither slot is a bye or unresolved
    pub fn entrants(&self) -> Option<(EntrantId, EntrantId)> {
        Some((self.a.entrant()?, self.b.entrant()?))
    }

    pub fn involves(&self, entrant: EntrantId) -> bool {
        self.a == Slot::Real(entrant) || self.b == Slot::Real(entrant)
    }

    pub fn has_bye(&self) -> bool {
        self.a.is_bye() || self.b.is_bye()
    }

    /// Pool index for pool matches
    pub fn pool_index(&self) -> Option<usize> {
        match self.phase {
            MatchPhase::Pool { pool_index } => Some(pool_index),
            MatchPhase::Elimination { .. } => None,
        }
    }

    /// Downstream link for elimination matches
    pub fn next(&self) -> Option<DownstreamLink> {
        match self.phase {
            MatchPhase::Elimination { next } => next,
            MatchPhase::Pool { .. } => None,
        }
    }

    pub(crate) fn set_next(&mut self, link: DownstreamLink) {
        if let MatchPhase::Elimination { next } = &mut self.phase {
            *next = Some(link);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_final()
    }
}
