//! Director module running the competition pipeline against external collaborators.
//!
//! This module provides:
//! - `RosterProvider` and `PersistenceSink` seams
//! - `StageDirector`, which seeds pools, closes a pool stage, builds the
//!   elimination table and records bracket results
//! - `MemoryStore`, an in-memory implementation of both seams
//!
//! ## Example
//!
//! ```
//! use fencing_engine::config::EngineConfig;
//! use fencing_engine::director::{MemoryStore, StageDirector};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new().with_roster(1, (1..=10).collect()));
//!     let director = StageDirector::new(store.clone(), store, EngineConfig::default())?;
//!
//!     let pools = director.seed_pool_stage(1, None).await?;
//!     println!("Seeded {} pools", pools.len());
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod memory;
pub mod repository;

pub use errors::{DirectorError, DirectorResult};
pub use manager::StageDirector;
pub use memory::{MemoryStore, StoreState};
pub use repository::{PersistenceSink, RosterProvider};
