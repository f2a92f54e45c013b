//! A simple per-resolution hinter.
//!
//! Stems are scaled to 26.6 fixed point, their widths rounded the way the
//! autohinter rounds vertical stems and their tops snapped to the pixel
//! grid. Directly overlapping stems are then pushed apart until at least
//! one pixel separates them.

use serde_json::Value;
use thiserror::Error;

use crate::{Glyph, HintActions, Hinter, Strategy, XActions};

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridFitError {
    #[error("stem {0} has a non-finite or negative extent")]
    DegenerateStem(usize),
}

/// Grid fitting by rounding, with collision avoidance for overlapping stems.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridFit;

impl Hinter for GridFit {
    type Error = GridFitError;

    fn hint(
        &self,
        glyph: &Glyph,
        ppem: u32,
        strategy: &Strategy,
    ) -> Result<HintActions, GridFitError> {
        let scale = strategy.scale(ppem) * 64.0;
        let stems = &glyph.stems;
        // (top, width) in 26.6
        let mut fitted: Vec<(i32, i32)> = Vec::with_capacity(stems.len());
        for (j, stem) in stems.iter().enumerate() {
            if !stem.y.is_finite() || !stem.width.is_finite() || stem.width < 0.0 {
                return Err(GridFitError::DegenerateStem(j));
            }
            let width = stem_width((stem.width * scale).round() as i32);
            let mut top = pix_round((stem.y * scale).round() as i32);
            for (k, &(other_top, other_width)) in fitted.iter().enumerate() {
                if !glyph.overlaps(j, k) {
                    continue;
                }
                if stem.y >= stems[k].y {
                    top = top.max(other_top + 64 + width);
                } else {
                    top = top.min(other_top - other_width - 64);
                }
            }
            fitted.push((top, width));
        }
        let y = fitted
            .iter()
            .map(|&(top, width)| Value::from(vec![top >> 6, width >> 6]))
            .collect();
        let original: f64 = stems.iter().map(|s| s.width * scale).sum();
        let rounded: i32 = fitted.iter().map(|&(_, width)| width).sum();
        let expand = if original > 0.0 {
            ((rounded as f64 / original - 1.0) * 1000.0).round() / 1000.0
        } else {
            0.0
        };
        Ok(HintActions {
            y: Value::Array(y),
            x: XActions { expand },
        })
    }
}

fn pix_round(x: i32) -> i32 {
    (x + 32) & !63
}

/// Vertical stems are at least one pixel; wider stems round with a bias
/// toward the smaller width.
fn stem_width(dist: i32) -> i32 {
    if dist >= 64 {
        (dist + 16) & !63
    } else {
        64
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::stem;

    fn strategy() -> Strategy {
        Strategy {
            upm: 1000.0,
            ..Default::default()
        }
    }

    #[test]
    fn single_stem() {
        let glyph = Glyph {
            stems: vec![stem(500.0, 70.0)],
            ..Default::default()
        };
        let actions = GridFit.hint(&glyph, 20, &strategy()).unwrap();
        assert_eq!(actions.y, json!([[10, 1]]));
        // 1.4px rounded down to 1px
        assert_eq!(actions.x.expand, -0.286);
    }

    #[test]
    fn overlapping_stems_stay_apart() {
        let mut glyph = Glyph {
            stems: vec![stem(100.0, 50.0), stem(180.0, 50.0)],
            ..Default::default()
        };
        let loose = GridFit.hint(&glyph, 10, &strategy()).unwrap();
        assert_eq!(loose.y, json!([[1, 1], [2, 1]]));
        glyph.direct_overlaps = vec![vec![], vec![true]];
        let apart = GridFit.hint(&glyph, 10, &strategy()).unwrap();
        assert_eq!(apart.y, json!([[1, 1], [3, 1]]));
        assert_eq!(apart.x.expand, 1.0);
    }

    #[test]
    fn rounding() {
        assert_eq!(stem_width(10), 64);
        assert_eq!(stem_width(100), 64);
        assert_eq!(stem_width(112), 128);
        assert_eq!(pix_round(95), 64);
        assert_eq!(pix_round(96), 128);
    }

    #[test]
    fn no_stems() {
        let actions = GridFit.hint(&Glyph::default(), 12, &strategy()).unwrap();
        assert_eq!(actions.y, json!([]));
        assert_eq!(actions.x.expand, 0.0);
    }

    #[test]
    fn degenerate_stem() {
        let glyph = Glyph {
            stems: vec![stem(100.0, 10.0), stem(f64::NAN, 10.0)],
            ..Default::default()
        };
        assert_eq!(
            GridFit.hint(&glyph, 12, &strategy()),
            Err(GridFitError::DegenerateStem(1))
        );
    }
}
