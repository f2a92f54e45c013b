//! Ordering of interpolation and short absorption instructions.
//!
//! Instructions are emitted by descending priority. At each priority the
//! interpolations come first, then the short absorptions, and within each
//! kind the instructions are sorted by their reference point pair.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Glyph, Interpolation, PointId, ShortAbsorption};

/// A positioned instruction with its priority removed.
///
/// Serializes as `[rp1, rp2, z]` or `[z0, z1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IpsaCall {
    Interpolate(PointId, PointId, PointId),
    ShortAbsorb(PointId, PointId),
}

impl From<&Interpolation> for IpsaCall {
    fn from(ip: &Interpolation) -> Self {
        Self::Interpolate(ip.rp1, ip.rp2, ip.z)
    }
}

impl From<&ShortAbsorption> for IpsaCall {
    fn from(sa: &ShortAbsorption) -> Self {
        Self::ShortAbsorb(sa.z0, sa.z1)
    }
}

#[derive(Default)]
struct Tier<'a> {
    interpolations: Vec<&'a Interpolation>,
    absorptions: Vec<&'a ShortAbsorption>,
}

/// Merge the glyph's interpolations and short absorptions into a single
/// emission order.
pub fn order_instructions(glyph: &Glyph) -> Vec<IpsaCall> {
    let mut tiers: BTreeMap<u32, Tier> = BTreeMap::new();
    for ip in &glyph.interpolations {
        tiers.entry(ip.priority).or_default().interpolations.push(ip);
    }
    for sa in &glyph.short_absorptions {
        tiers.entry(sa.priority).or_default().absorptions.push(sa);
    }

    let mut calls = Vec::with_capacity(glyph.interpolations.len() + glyph.short_absorptions.len());
    for tier in tiers.values_mut().rev() {
        // stable, so identical pairs keep input order
        tier.interpolations.sort_by_key(|ip| (ip.rp1, ip.rp2));
        tier.absorptions.sort_by_key(|sa| (sa.z0, sa.z1));
        calls.extend(tier.interpolations.iter().map(|ip| IpsaCall::from(*ip)));
        calls.extend(tier.absorptions.iter().map(|sa| IpsaCall::from(*sa)));
    }
    calls
}
