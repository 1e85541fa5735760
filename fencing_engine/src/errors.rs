//! Error types shared by the pairing and ranking components.

use thiserror::Error;

use crate::matches::{MatchId, MatchStatus};

/// Engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Input rejected before anything was generated
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested format or option is not supported
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Match status change not allowed by the transition table
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    /// Score rejected when recording a result
    #[error("Invalid score: {0}")]
    InvalidScore(String),

    /// Match id outside the generated set
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Match finished without a winner that could advance
    #[error("Match {0} has no winner to advance")]
    NoWinner(MatchId),
}

impl EngineError {
    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    /// Shorthand for a configuration failure
    pub fn configuration(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }

    /// Whether the caller can fix this by changing its input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Validation(_) | EngineError::InvalidScore(_)
        )
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
