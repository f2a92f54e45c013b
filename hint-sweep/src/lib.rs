//! Multi-resolution hint sweep for stem-based glyph feature files.
//!
//! Each input record carries a glyph whose stems, overlaps and
//! interpolations have already been extracted. For every glyph we:
//!
//! 1. derive the highest resolution at which overlapping stems can still be
//!    kept apart on the pixel grid ([`cutoff`]),
//! 2. run a per-resolution [`Hinter`] from that cutoff down to the minimum
//!    ppem ([`sweep`]),
//! 3. order the interpolation and short absorption instructions by
//!    priority ([`order_instructions`]),
//! 4. write one [`HintRecord`] line to the output stream.
//!
//! Records produced by parallel shards are recombined with [`merge`].

mod error;
mod glyph;
mod grid;
mod ipsa;
mod progress;
mod record;
mod shard;
mod strategy;

#[cfg(test)]
mod testing;

pub mod cutoff;
pub mod merge;
pub mod pipeline;
pub mod sweep;

pub use error::{BoxedHintError, Error};
pub use glyph::{Glyph, InputRecord, Interpolation, KeyPoint, PointId, ShortAbsorption, Stem};
pub use grid::{GridFit, GridFitError};
pub use ipsa::{order_instructions, IpsaCall};
pub use progress::Progress;
pub use record::{HintPayload, HintRecord, SideIndependent, StemSummary};
pub use shard::ShardFilter;
pub use strategy::{ParameterFile, Strategy};
pub use sweep::{HintActions, Hinter, Sweep, XActions};
