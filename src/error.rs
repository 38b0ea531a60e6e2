//! Error types for the persistence layer.
//!
//! Nothing in the game core is fatal: callers of the store turn these into
//! defaults and a log line.

use std::io;

/// Errors raised by a [`crate::store::KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Could not determine a data directory")]
    NoDataDir,
    #[error("I/O error on record '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Could not encode record '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(key: &str, source: io::Error) -> Self {
        Self::Io {
            key: key.to_string(),
            source,
        }
    }

    pub fn encode(key: &str, source: serde_json::Error) -> Self {
        Self::Encode {
            key: key.to_string(),
            source,
        }
    }
}
