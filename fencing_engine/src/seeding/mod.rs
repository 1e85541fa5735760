//! Seeding module distributing a ranked roster into pools.
//!
//! ## Example
//!
//! ```
//! use fencing_engine::seeding::SeedingEngine;
//!
//! let engine = SeedingEngine::new(7, 3).unwrap();
//! let pools = engine.seed(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
//! assert_eq!(pools.len(), 2);
//! assert_eq!(pools[0].letter, "A");
//! ```

pub mod models;
pub mod snake;

pub use models::{Pool, SeedingSummary, pool_letter};
pub use snake::{SeedingEngine, seed, seed_placement, snake_distribution, summarize};
