//! Upper resolution bound derived from stem overlap geometry.
//!
//! Two directly overlapping stems need `SPARE_PIXLS` pixels between them.
//! The tighter the closest overlapping pair, the larger the ppem at which
//! that space first becomes available, so the sweep for that glyph starts
//! there.

use crate::{Glyph, Stem, Strategy};

/// Vertical space between the bottom of `upper` and the top of `lower`.
fn separation(upper: &Stem, lower: &Stem) -> f64 {
    upper.y - upper.width - lower.y
}

/// Smallest separation between any pair of directly overlapping stems.
///
/// Returns `None` if no pair overlaps.
pub fn min_overlap_distance(glyph: &Glyph) -> Option<f64> {
    let stems = &glyph.stems;
    let mut min = None;
    for j in 0..stems.len() {
        for k in 0..j {
            if !glyph.overlaps(j, k) {
                continue;
            }
            let d = separation(&stems[j], &stems[k]);
            if min.map_or(true, |m| d < m) {
                min = Some(d);
            }
        }
    }
    min
}

/// Cutoff resolution for a given overlap distance, clamped into
/// `[PPEM_MIT, PPEM_MAX]`.
///
/// Distances below one unit (touching or crossing stems) are treated as one
/// unit so the result stays finite.
pub fn cutoff_for_distance(distance: f64, strategy: &Strategy) -> u32 {
    let d = distance.max(1.0);
    let ppem = (strategy.upm * strategy.spare_pixls / d).round();
    if ppem <= strategy.ppem_mit as f64 {
        strategy.ppem_mit
    } else if ppem >= strategy.ppem_max as f64 {
        strategy.ppem_max
    } else {
        ppem as u32
    }
}

/// The highest ppem at which `glyph` is hinted.
///
/// Glyphs without overlapping stems are never limited, so they get
/// `PPEM_MAX`.
pub fn cutoff(glyph: &Glyph, strategy: &Strategy) -> u32 {
    match min_overlap_distance(glyph) {
        Some(d) => cutoff_for_distance(d, strategy),
        None => strategy.ppem_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stem;

    fn strategy() -> Strategy {
        Strategy {
            upm: 1000.0,
            ppem_min: 8,
            ppem_max: 40,
            ppem_mit: 12,
            spare_pixls: 0.25,
        }
    }

    fn two_stem_glyph(distance: f64) -> Glyph {
        // upper stem bottom sits `distance` units above the lower stem top
        Glyph {
            stems: vec![stem(100.0, 20.0), stem(120.0 + distance, 20.0)],
            direct_overlaps: vec![vec![false, false], vec![true, false]],
            ..Default::default()
        }
    }

    #[test]
    fn distance_of_overlapping_pair() {
        let glyph = two_stem_glyph(15.0);
        assert_eq!(min_overlap_distance(&glyph), Some(15.0));
    }

    #[test]
    fn only_overlapping_pairs_count() {
        let glyph = Glyph {
            stems: vec![stem(100.0, 20.0), stem(130.0, 20.0), stem(400.0, 20.0)],
            // stems 1 and 0 are close but don't interact
            direct_overlaps: vec![vec![], vec![false], vec![true, false]],
            ..Default::default()
        };
        assert_eq!(min_overlap_distance(&glyph), Some(280.0));
    }

    #[test]
    fn cutoff_is_non_increasing_in_distance() {
        let strategy = strategy();
        let mut prev = u32::MAX;
        for d in [1.0, 2.0, 4.0, 100.0] {
            let cutoff = cutoff(&two_stem_glyph(d), &strategy);
            assert!(cutoff <= prev, "d={d}: {cutoff} > {prev}");
            assert!((strategy.ppem_mit..=strategy.ppem_max).contains(&cutoff));
            prev = cutoff;
        }
    }

    #[test]
    fn cutoff_values() {
        let strategy = strategy();
        // 1000 * 0.25 / 10 = 25
        assert_eq!(cutoff(&two_stem_glyph(10.0), &strategy), 25);
        // 250 / 4 = 62.5 -> clamped
        assert_eq!(cutoff(&two_stem_glyph(4.0), &strategy), 40);
        // 250 / 100 = 2.5 -> floor at PPEM_MIT
        assert_eq!(cutoff(&two_stem_glyph(100.0), &strategy), 12);
    }

    #[test]
    fn crossing_stems_clamp_to_one_unit() {
        let strategy = Strategy {
            spare_pixls: 0.01,
            ..strategy()
        };
        // negative distance behaves like d = 1: 1000 * 0.01 / 1 = 10 -> 12
        let glyph = two_stem_glyph(-30.0);
        assert_eq!(cutoff(&glyph, &strategy), 12);
        assert_eq!(cutoff_for_distance(0.0, &strategy), 12);
        assert_eq!(
            cutoff_for_distance(0.5, &Strategy {
                spare_pixls: 0.03,
                ..strategy
            }),
            30
        );
    }

    #[test]
    fn no_overlaps_yield_ppem_max() {
        let strategy = strategy();
        assert_eq!(cutoff(&Glyph::default(), &strategy), 40);
        let glyph = Glyph {
            stems: vec![stem(100.0, 20.0), stem(125.0, 20.0)],
            ..Default::default()
        };
        assert_eq!(min_overlap_distance(&glyph), None);
        assert_eq!(cutoff(&glyph, &strategy), 40);
    }
}
