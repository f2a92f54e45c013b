//! Recombine record streams produced by parallel shards.
//!
//! The first record seen for a glyph key wins; later records for the same
//! key are dropped. Shards computing overlapping ranges are expected, so a
//! duplicate is not an error.

use std::{
    hash::{Hash, Hasher},
    io::Write,
    path::Path,
};

use fnv::{FnvHashMap, FnvHasher};
use serde_json::Value;

use crate::{glyph::key_text, Error};

/// Record counts for a merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Records read across all shards.
    pub read: usize,
    /// Records written after dropping duplicates.
    pub retained: usize,
}

impl std::fmt::Display for MergeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} records found; {} records after merging.",
            self.read, self.retained
        )
    }
}

/// Deduplicating writer over a sequence of shards.
#[derive(Debug, Default)]
pub struct Merger {
    // key -> hash of the retained line
    seen: FnvHashMap<String, u64>,
    stats: MergeStats,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    /// Read the shard at `path` completely, then merge its records into
    /// `out`.
    pub fn merge_file(&mut self, path: &Path, out: &mut impl Write) -> Result<(), Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Shard {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("merging {}", path.display());
        self.merge_str(&text, out)
    }

    /// Merge the records in `text`, writing lines with unseen keys to `out`
    /// unmodified.
    pub fn merge_str(&mut self, text: &str, out: &mut impl Write) -> Result<(), Error> {
        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = record_key(trimmed, index + 1)?;
            self.stats.read += 1;
            let hash = line_hash(trimmed);
            match self.seen.get(&key) {
                Some(&retained) if retained != hash => {
                    log::warn!("conflicting records for glyph {key}; keeping the first");
                }
                Some(_) => (),
                None => {
                    writeln!(out, "{line}")?;
                    self.seen.insert(key, hash);
                    self.stats.retained += 1;
                }
            }
        }
        Ok(())
    }
}

/// Merge the shards at `paths`, in order, into `out`.
pub fn merge_files<P: AsRef<Path>>(
    paths: &[P],
    out: &mut impl Write,
) -> Result<MergeStats, Error> {
    let mut merger = Merger::new();
    for path in paths {
        merger.merge_file(path.as_ref(), out)?;
    }
    out.flush()?;
    let stats = merger.stats();
    log::info!("merged {} shards: {stats}", paths.len());
    Ok(stats)
}

fn record_key(line: &str, line_number: usize) -> Result<String, Error> {
    let record: Value = serde_json::from_str(line).map_err(|source| Error::Parse {
        line: line_number,
        source,
    })?;
    let key = match record {
        Value::Array(items) => items.into_iter().nth(1),
        _ => None,
    };
    key.map(|key| key_text(&key))
        .ok_or(Error::MalformedRecord {
            line: line_number,
            reason: "expected an array with a glyph key at index 1",
        })
}

fn line_hash(line: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    line.hash(&mut hasher);
    hasher.finish()
}
