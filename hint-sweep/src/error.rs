//! Errors raised while hinting or merging records.

use std::path::PathBuf;

use thiserror::Error;

use crate::sweep::SweepError;

/// Boxed failure reported by a [`Hinter`](crate::Hinter).
pub type BoxedHintError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure is fatal for the run; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: &'static str },

    #[error("hinting glyph {glyph} failed: {source}")]
    Hint {
        glyph: String,
        #[source]
        source: SweepError,
    },

    #[error("unable to read shard '{}': {source}", path.display())]
    Shard {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter file: {0}")]
    Parameters(#[from] toml::de::Error),

    #[error("invalid strategy: {0}")]
    InvalidStrategy(String),

    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),
}
