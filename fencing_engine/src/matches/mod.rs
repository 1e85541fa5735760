//! Match module for pool bouts and elimination bouts.
//!
//! This module provides:
//! - The shared `Match` model with slots, status and score
//! - Round-robin generation for pools
//! - Result recording through the status transition table
//!
//! ## Example
//!
//! ```
//! use fencing_engine::matches::PoolMatchGenerator;
//!
//! let matches = PoolMatchGenerator::generate(&[101, 102, 103], 1, 1, None);
//! assert_eq!(matches.len(), 3);
//! ```

pub mod models;
pub mod pool_generator;
pub mod results;

pub use models::{
    DownstreamLink, EntrantId, Match, MatchId, MatchPhase, MatchStatus, RoundLabel, Score, Side,
    Slot, StageId,
};
pub use pool_generator::{PoolMatchGenerator, Schedule};
