//! Director error types.

use thiserror::Error;

use crate::errors::EngineError;
use crate::matches::StageId;

/// Errors raised while running a pipeline step against the collaborators
#[derive(Debug, Error)]
pub enum DirectorError {
    /// Pairing or ranking rejected the input
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Roster provider failed
    #[error("Roster error: {0}")]
    Roster(String),

    /// Persistence sink failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Nothing stored for the stage yet
    #[error("Stage not found: {0}")]
    StageNotFound(StageId),

    /// Stored state could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for director operations
pub type DirectorResult<T> = Result<T, DirectorError>;
