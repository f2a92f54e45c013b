//! Progress reporting for the hint pipeline.

use std::io::{self, Write};

const BAR_LENGTH: usize = 30;

/// Renders a progress line to a diagnostic writer.
///
/// The last rendered bar is threaded through [`Progress::tick`] by the
/// caller, and a line is only written when the bar changes.
#[derive(Clone, Debug)]
pub struct Progress {
    source: String,
    divide: usize,
    modulo: usize,
}

impl Progress {
    pub fn new(source: impl Into<String>, divide: usize, modulo: usize) -> Self {
        Self {
            source: source.into(),
            divide,
            modulo,
        }
    }

    /// The bar for zero progress.
    pub fn start(&self) -> String {
        bar(0, 1)
    }

    /// Report `done` of `total` glyphs, returning the bar to pass to the
    /// next tick.
    pub fn tick(
        &self,
        current: String,
        done: usize,
        total: usize,
        out: &mut dyn Write,
    ) -> io::Result<String> {
        let bar = bar(done, total);
        if bar == current {
            return Ok(current);
        }
        writeln!(
            out,
            "HGFHINT: Hinting [{bar}](#{done:>5}/{total:>5}) of {} {:03}d{:03}",
            self.source, self.modulo, self.divide
        )?;
        Ok(bar)
    }
}

fn bar(done: usize, total: usize) -> String {
    // an empty batch is complete
    let (done, total) = if total == 0 { (1, 1) } else { (done, total) };
    (1..=BAR_LENGTH)
        .map(|j| if j * total > done * BAR_LENGTH { ' ' } else { '#' })
        .collect()
}
