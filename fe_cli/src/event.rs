//! Event file handling.
//!
//! An event is a `MemoryStore` written to disk as JSON. A missing file is an
//! empty event.

use fencing_engine::director::{DirectorError, MemoryStore};
use std::path::Path;
use std::time::Instant;

use crate::logging::log_performance;

/// Stage holding the pool round
pub const POOL_STAGE: i64 = 1;

/// Stage holding the direct elimination
pub const ELIMINATION_STAGE: i64 = 2;

/// Event file errors
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Failed to access event file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Event file is corrupt: {0}")]
    Corrupt(#[from] DirectorError),
}

/// Load an event, or start an empty one if the file does not exist
pub async fn load(path: &Path) -> Result<MemoryStore, EventError> {
    let start = Instant::now();
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No event at {}, starting a new one", path.display());
            return Ok(MemoryStore::new());
        }
        Err(source) => {
            return Err(EventError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };
    let store = MemoryStore::from_json(&json)?;
    log_performance(
        "load_event",
        start.elapsed().as_millis() as u64,
        path.to_str(),
    );
    Ok(store)
}

/// Write an event back to disk
pub async fn save(path: &Path, store: &MemoryStore) -> Result<(), EventError> {
    let start = Instant::now();
    let json = store.to_json().await?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| EventError::Io {
            path: path.display().to_string(),
            source,
        })?;
    log_performance(
        "save_event",
        start.elapsed().as_millis() as u64,
        path.to_str(),
    );
    Ok(())
}
