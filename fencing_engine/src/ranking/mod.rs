//! Ranking module turning pool results into standings and qualifiers.
//!
//! Standings are a view computed from completed matches; nothing here holds
//! state between calls.
//!
//! ## Example
//!
//! ```
//! use fencing_engine::matches::PoolMatchGenerator;
//! use fencing_engine::ranking::{PromotionSelector, RankingEngine};
//!
//! let mut matches = PoolMatchGenerator::generate(&[1, 2, 3], 1, 1, None);
//! matches[0].record_score(5, 3, 5).unwrap();
//! matches[1].record_score(5, 1, 5).unwrap();
//! matches[2].record_score(4, 5, 5).unwrap();
//!
//! let pool = RankingEngine::rank_pool(0, &matches);
//! assert_eq!(pool.standings[0].entrant, 1);
//! assert_eq!(PromotionSelector::promote(&[pool], 2).unwrap(), vec![1, 3]);
//! ```

pub mod promotion;
pub mod standings;

pub use promotion::PromotionSelector;
pub use standings::{HeadToHead, PoolStandings, RankingEngine, Standing, head_to_head_of};
