//! Batch driver: feature records in, hint records out.

use std::io::{BufRead, Write};

use rayon::prelude::*;

use crate::{
    cutoff::cutoff, sweep::sweep, Error, HintRecord, Hinter, InputRecord, Progress, ShardFilter,
    Strategy,
};

/// Glyphs hinted per parallel batch, per worker thread.
const GLYPHS_PER_THREAD: usize = 16;

/// Read every line of `reader`, keeping the non-blank lines selected by
/// `filter`.
///
/// Line indices count blank lines, so shards split the raw file. Lines
/// belonging to other shards are never decoded.
pub fn read_batch<R: BufRead>(reader: R, filter: ShardFilter) -> Result<Vec<InputRecord>, Error> {
    let mut batch = Vec::new();
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        if !filter.accepts(index) {
            continue;
        }
        let line = std::str::from_utf8(&bytes).map_err(|_| Error::MalformedRecord {
            line: index + 1,
            reason: "invalid UTF-8",
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| Error::Parse {
            line: index + 1,
            source,
        })?;
        batch.push(record);
    }
    Ok(batch)
}

/// Compute the cutoff, sweep and record for a single glyph.
pub fn hint_record<H: Hinter>(
    input: &InputRecord,
    strategy: &Strategy,
    hinter: &H,
) -> Result<HintRecord, Error> {
    let cutoff = cutoff(&input.glyph, strategy);
    log::debug!(
        "glyph {}: {} stems, sweeping {cutoff} down to {} ppem",
        input.key_text(),
        input.glyph.stems.len(),
        strategy.ppem_min
    );
    let sweep = sweep(hinter, &input.glyph, cutoff, strategy).map_err(|source| Error::Hint {
        glyph: input.key_text(),
        source,
    })?;
    Ok(HintRecord::new(input, sweep, strategy))
}

/// Options for a hint run.
#[derive(Clone, Debug)]
pub struct HintJob<'a, H> {
    pub strategy: &'a Strategy,
    pub hinter: H,
    pub filter: ShardFilter,
    /// Hint glyphs on the rayon pool. Output order is unchanged.
    pub parallel: bool,
    /// Name of the input shown in progress lines.
    pub source: String,
}

impl<H: Hinter + Sync> HintJob<'_, H> {
    /// Hint every selected glyph of `input`, writing one line per glyph to
    /// `out` and progress lines to `diagnostics`.
    ///
    /// Returns the number of records written.
    pub fn run<R: BufRead, W: Write>(
        &self,
        input: R,
        out: &mut W,
        diagnostics: &mut dyn Write,
    ) -> Result<usize, Error> {
        let batch = read_batch(input, self.filter)?;
        let total = batch.len();
        log::info!("hinting {total} glyphs of {}", self.source);
        let progress = Progress::new(
            self.source.as_str(),
            self.filter.divide(),
            self.filter.modulo(),
        );
        let mut current = progress.start();
        let mut written = 0;
        let chunk_len = if self.parallel {
            rayon::current_num_threads() * GLYPHS_PER_THREAD
        } else {
            1
        };
        for chunk in batch.chunks(chunk_len.max(1)) {
            let lines: Vec<Result<String, Error>> = if self.parallel {
                chunk.par_iter().map(|input| self.line(input)).collect()
            } else {
                chunk.iter().map(|input| self.line(input)).collect()
            };
            for line in lines {
                // whole lines only, so a failure never leaves a partial record
                writeln!(out, "{}", line?)?;
                written += 1;
                current = progress.tick(current, written, total, diagnostics)?;
            }
        }
        out.flush()?;
        progress.tick(current, written, total, diagnostics)?;
        Ok(written)
    }

    fn line(&self, input: &InputRecord) -> Result<String, Error> {
        hint_record(input, self.strategy, &self.hinter)?.to_line()
    }
}
