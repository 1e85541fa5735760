//! # Fencing Engine
//!
//! Pairing and ranking for fencing competitions: a ranked roster is seeded
//! into pools, each pool fences a round robin, pool results are ranked and
//! the qualifiers go into a single-elimination table.
//!
//! ## Pipeline
//!
//! - **Seeding**: snake distribution of the roster into balanced pools
//! - **Pool matches**: every pair of a pool meets exactly once
//! - **Ranking**: wins, indicator and touches scored, with head-to-head for
//!   a two-way tie
//! - **Promotion**: the top of each pool, concatenated in pool order
//! - **Bracket**: a power-of-two table with tail byes and explicit
//!   downstream slots for each winner
//!
//! All of these are pure functions over their input. The [`director`]
//! module wraps them in async steps against a roster provider and a store.
//!
//! ## Example
//!
//! ```
//! use fencing_engine::{BracketGenerator, BracketType, PoolMatchGenerator, SeedingEngine};
//!
//! let engine = SeedingEngine::new(4, 3).unwrap();
//! let pools = engine.seed(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
//! let bouts = PoolMatchGenerator::generate_all(&pools, 1, 1, None);
//! assert_eq!(bouts.len(), 12);
//!
//! let bracket = BracketGenerator::generate(&[1, 2, 3, 4, 5], 2, BracketType::SingleElimination).unwrap();
//! assert_eq!(bracket.matches.len(), 7);
//! ```

/// Elimination brackets and winner advancement.
pub mod bracket;
pub use bracket::{Bracket, BracketGenerator, BracketType};

pub mod config;
pub use config::EngineConfig;

/// Async orchestration over roster and persistence seams.
pub mod director;

pub mod errors;
pub use errors::{EngineError, EngineResult};

/// Match models, round-robin generation and result recording.
pub mod matches;
pub use matches::{EntrantId, Match, MatchId, MatchStatus, PoolMatchGenerator, Schedule, Slot};

/// Standings and qualifier selection.
pub mod ranking;
pub use ranking::{PoolStandings, PromotionSelector, RankingEngine, Standing};

pub mod rules;
pub use rules::{RuleBook, RulePreset, StaticRuleBook, Weapon};

/// Snake seeding of a roster into pools.
pub mod seeding;
pub use seeding::{Pool, SeedingEngine};
