//! Per-glyph resolution sweep.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::{error::BoxedHintError, Glyph, Strategy};

/// Computes grid-fitting actions for a single glyph at a single ppem.
///
/// Implementations are expected to be deterministic and free of side
/// effects; the sweep calls them once per resolution, from the largest
/// ppem down.
pub trait Hinter {
    type Error: std::error::Error + Send + Sync + 'static;

    fn hint(
        &self,
        glyph: &Glyph,
        ppem: u32,
        strategy: &Strategy,
    ) -> Result<HintActions, Self::Error>;
}

impl<H: Hinter + ?Sized> Hinter for &H {
    type Error = H::Error;

    fn hint(
        &self,
        glyph: &Glyph,
        ppem: u32,
        strategy: &Strategy,
    ) -> Result<HintActions, Self::Error> {
        (**self).hint(glyph, ppem, strategy)
    }
}

/// Output of a [`Hinter`] for one resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct HintActions {
    /// Vertical stem actions. Opaque to the sweep.
    pub y: Value,
    pub x: XActions,
}

/// Horizontal adjustments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct XActions {
    pub expand: f64,
}

/// Actions collected over every swept resolution, keyed by ppem.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sweep {
    pub actions: BTreeMap<u32, Value>,
    pub expansion: BTreeMap<u32, f64>,
}

impl Sweep {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// The hinter failed at a particular resolution.
#[derive(Debug, Error)]
#[error("{source} (at {ppem} ppem)")]
pub struct SweepError {
    pub ppem: u32,
    #[source]
    pub source: BoxedHintError,
}

/// Run `hinter` on every ppem from `cutoff` down to `PPEM_MIN`.
///
/// A cutoff below `PPEM_MIN` sweeps nothing and yields empty tables.
pub fn sweep<H: Hinter>(
    hinter: &H,
    glyph: &Glyph,
    cutoff: u32,
    strategy: &Strategy,
) -> Result<Sweep, SweepError> {
    let mut result = Sweep::default();
    for ppem in (strategy.ppem_min..=cutoff).rev() {
        let actions = hinter
            .hint(glyph, ppem, strategy)
            .map_err(|e| SweepError {
                ppem,
                source: Box::new(e),
            })?;
        result.actions.insert(ppem, actions.y);
        result.expansion.insert(ppem, actions.x.expand);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::testing::{FailAt, StubHinter};

    fn strategy(ppem_min: u32) -> Strategy {
        Strategy {
            ppem_min,
            ..Default::default()
        }
    }

    #[test]
    fn covers_cutoff_down_to_min() {
        let result = sweep(&StubHinter, &Glyph::default(), 20, &strategy(8)).unwrap();
        assert_eq!(result.actions.len(), 13);
        assert_eq!(
            result.actions.keys().copied().collect::<Vec<_>>(),
            (8..=20).collect::<Vec<_>>()
        );
        assert_eq!(
            result.expansion.keys().copied().collect::<Vec<_>>(),
            (8..=20).collect::<Vec<_>>()
        );
        assert_eq!(result.actions[&8], Value::from(8));
        assert_eq!(result.expansion[&20], 2.0);
    }

    #[test]
    fn cutoff_below_min_is_empty() {
        let result = sweep(&StubHinter, &Glyph::default(), 5, &strategy(8)).unwrap();
        assert!(result.is_empty());
        assert!(result.expansion.is_empty());
    }

    #[test]
    fn single_resolution() {
        let result = sweep(&StubHinter, &Glyph::default(), 8, &strategy(8)).unwrap();
        assert_eq!(result.actions.len(), 1);
    }

    #[test]
    fn visits_descending() {
        struct Recorder(RefCell<Vec<u32>>);
        impl Hinter for Recorder {
            type Error = std::convert::Infallible;
            fn hint(
                &self,
                _: &Glyph,
                ppem: u32,
                _: &Strategy,
            ) -> Result<HintActions, Self::Error> {
                self.0.borrow_mut().push(ppem);
                Ok(HintActions {
                    y: Value::Null,
                    x: XActions::default(),
                })
            }
        }
        let recorder = Recorder(RefCell::new(vec![]));
        sweep(&recorder, &Glyph::default(), 12, &strategy(10)).unwrap();
        assert_eq!(recorder.0.into_inner(), [12, 11, 10]);
    }

    #[test]
    fn failure_stops_the_sweep() {
        let err = sweep(&FailAt(15), &Glyph::default(), 20, &strategy(8)).unwrap_err();
        assert_eq!(err.ppem, 15);
        assert!(err.to_string().contains("15 ppem"));
    }
}
