//! Output records.

use std::collections::BTreeMap;

use serde::{ser::SerializeSeq, Serialize, Serializer};
use serde_json::Value;

use crate::{
    order_instructions, Error, Glyph, InputRecord, IpsaCall, PointId, Stem, Strategy, Sweep,
};

/// One output line: `[shard, key, payload]`.
#[derive(Clone, Debug)]
pub struct HintRecord {
    pub shard: Value,
    pub key: Value,
    pub payload: HintPayload,
}

impl Serialize for HintRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.shard, &self.key, &self.payload).serialize(serializer)
    }
}

impl HintRecord {
    pub fn new(input: &InputRecord, sweep: Sweep, strategy: &Strategy) -> Self {
        let Sweep { actions, expansion } = sweep;
        Self {
            shard: input.shard.clone(),
            key: input.key.clone(),
            payload: HintPayload {
                si: SideIndependent::new(&input.glyph, expansion),
                sd: actions,
                pmin: strategy.ppem_min,
                pmax: strategy.ppem_max,
            },
        }
    }

    /// The record as a single JSON line, without the trailing newline.
    pub fn to_line(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::Serialize)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct HintPayload {
    /// Resolution independent data.
    pub si: SideIndependent,
    /// Vertical actions for each hinted ppem.
    #[serde(serialize_with = "by_ppem")]
    pub sd: BTreeMap<u32, Value>,
    pub pmin: u32,
    pub pmax: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideIndependent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_blue_points: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_blue_points: Option<Value>,
    pub ipsacalls: Vec<IpsaCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diag_aligns: Option<Value>,
    #[serde(rename = "xIP", skip_serializing_if = "Option::is_none")]
    pub x_ip: Option<Value>,
    #[serde(serialize_with = "by_ppem")]
    pub x_expansion: BTreeMap<u32, f64>,
    pub stems: Vec<StemSummary>,
}

impl SideIndependent {
    fn new(glyph: &Glyph, x_expansion: BTreeMap<u32, f64>) -> Self {
        Self {
            blue: glyph.blue_zoned.clone(),
            bottom_blue_points: glyph.bottom_blue_points.clone(),
            top_blue_points: glyph.top_blue_points.clone(),
            ipsacalls: order_instructions(glyph),
            diag_aligns: glyph.diag_aligns.clone(),
            x_ip: glyph.x_ip.clone(),
            x_expansion,
            stems: glyph.stems.iter().map(StemSummary::from).collect(),
        }
    }
}

/// Unscaled stem attributes needed when generating instructions.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StemSummary {
    pub y0: f64,
    pub w0: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_key_at_top: Option<bool>,
    pub pos_key: PointId,
    pub adv_key: PointId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_align: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_align: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diag_high: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diag_low: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,
    /// Horizontal distance from the position key to the advance key.
    #[serde(rename = "keyDX")]
    pub key_dx: f64,
}

impl From<&Stem> for StemSummary {
    fn from(stem: &Stem) -> Self {
        Self {
            y0: stem.y,
            w0: stem.width,
            pos_key_at_top: stem.pos_key_at_top,
            pos_key: stem.pos_key.id,
            adv_key: stem.adv_key.id,
            pos_align: stem.pos_align.clone(),
            adv_align: stem.adv_align.clone(),
            diag_high: stem.diag_high,
            diag_low: stem.diag_low,
            slope: stem.slope,
            key_dx: stem.adv_key.x - stem.pos_key.x,
        }
    }
}

/// Write a ppem keyed table as an array indexed by ppem, with `null` in
/// the unused slots.
fn by_ppem<T, S>(table: &BTreeMap<u32, T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let len = table
        .keys()
        .next_back()
        .map_or(0, |&max| max as usize + 1);
    let mut seq = serializer.serialize_seq(Some(len))?;
    for ppem in 0..len as u32 {
        seq.serialize_element(&table.get(&ppem))?;
    }
    seq.end()
}
