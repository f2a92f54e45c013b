//! Glyph feature records as produced by the outline analysis step.
//!
//! Only the fields consumed by the sweep are typed; alignment and blue zone
//! data are carried through to the output untouched.

use serde::Deserialize;
use serde_json::Value;

/// Index of a point in the glyph outline.
pub type PointId = u32;

/// One line of the input feature file: `[shard, key, glyph]`.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "(Value, Value, Glyph)")]
pub struct InputRecord {
    pub shard: Value,
    pub key: Value,
    pub glyph: Glyph,
}

impl From<(Value, Value, Glyph)> for InputRecord {
    fn from((shard, key, glyph): (Value, Value, Glyph)) -> Self {
        Self { shard, key, glyph }
    }
}

impl InputRecord {
    /// The glyph key as text, for diagnostics.
    pub fn key_text(&self) -> String {
        key_text(&self.key)
    }
}

/// Text form of a record key: strings contribute their contents, anything
/// else its JSON form.
pub(crate) fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    #[serde(default)]
    pub stems: Vec<Stem>,
    /// `direct_overlaps[j][k]` is set when stems `j` and `k` must be kept
    /// apart at every resolution.
    #[serde(default, deserialize_with = "overlap_matrix")]
    pub direct_overlaps: Vec<Vec<bool>>,
    #[serde(default)]
    pub interpolations: Vec<Interpolation>,
    #[serde(default)]
    pub short_absorptions: Vec<ShortAbsorption>,
    #[serde(default, deserialize_with = "present")]
    pub blue_zoned: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub bottom_blue_points: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub top_blue_points: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub diag_aligns: Option<Value>,
    #[serde(default, rename = "xIP", deserialize_with = "present")]
    pub x_ip: Option<Value>,
}

impl Glyph {
    /// Returns true if stems `j` and `k` directly overlap.
    ///
    /// Entries missing from a ragged matrix count as no overlap.
    pub fn overlaps(&self, j: usize, k: usize) -> bool {
        self.direct_overlaps
            .get(j)
            .and_then(|row| row.get(k))
            .copied()
            .unwrap_or(false)
    }
}

/// A horizontal stroke, keyed by its top edge.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stem {
    pub y: f64,
    pub width: f64,
    pub pos_key: KeyPoint,
    pub adv_key: KeyPoint,
    #[serde(default)]
    pub pos_key_at_top: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub pos_align: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub adv_align: Option<Value>,
    #[serde(default)]
    pub diag_high: Option<bool>,
    #[serde(default)]
    pub diag_low: Option<bool>,
    #[serde(default)]
    pub slope: Option<f64>,
}

/// Outline point anchoring one edge of a stem.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct KeyPoint {
    pub id: PointId,
    pub x: f64,
}

/// Interpolate `z` between the reference points `rp1` and `rp2`.
///
/// Encoded as `[rp1, rp2, z, priority]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "(PointId, PointId, PointId, u32)")]
pub struct Interpolation {
    pub rp1: PointId,
    pub rp2: PointId,
    pub z: PointId,
    pub priority: u32,
}

impl From<(PointId, PointId, PointId, u32)> for Interpolation {
    fn from((rp1, rp2, z, priority): (PointId, PointId, PointId, u32)) -> Self {
        Self {
            rp1,
            rp2,
            z,
            priority,
        }
    }
}

/// Move `z1` together with `z0`. Encoded as `[z0, z1, priority]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "(PointId, PointId, u32)")]
pub struct ShortAbsorption {
    pub z0: PointId,
    pub z1: PointId,
    pub priority: u32,
}

impl From<(PointId, PointId, u32)> for ShortAbsorption {
    fn from((z0, z1, priority): (PointId, PointId, u32)) -> Self {
        Self { z0, z1, priority }
    }
}

// Pass-through fields keep an explicit `null`; only absent fields are `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// Feature files written by older tools use 0/1 instead of booleans.
fn overlap_matrix<'de, D>(deserializer: D) -> Result<Vec<Vec<bool>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
        Null(()),
    }

    let rows: Vec<Vec<Flag>> = Deserialize::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|flag| match flag {
                    Flag::Bool(b) => b,
                    Flag::Number(n) => n != 0.0,
                    Flag::Null(()) => false,
                })
                .collect()
        })
        .collect())
}
