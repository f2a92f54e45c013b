//! Helpers for unit testing

use serde_json::Value;
use thiserror::Error;

use crate::{Glyph, HintActions, Hinter, KeyPoint, Stem, Strategy, XActions};

pub fn stem(y: f64, width: f64) -> Stem {
    let key = KeyPoint { id: 0, x: 0.0 };
    Stem {
        y,
        width,
        pos_key: key,
        adv_key: key,
        pos_key_at_top: Some(true),
        pos_align: None,
        adv_align: None,
        diag_high: None,
        diag_low: None,
        slope: None,
    }
}

/// Returns the ppem as the y actions and a tenth of it as the expansion.
pub struct StubHinter;

impl Hinter for StubHinter {
    type Error = std::convert::Infallible;

    fn hint(&self, _: &Glyph, ppem: u32, _: &Strategy) -> Result<HintActions, Self::Error> {
        Ok(HintActions {
            y: Value::from(ppem),
            x: XActions {
                expand: ppem as f64 / 10.0,
            },
        })
    }
}

#[derive(Debug, Error)]
#[error("stub failure")]
pub struct StubError;

/// Like [`StubHinter`] but fails at one resolution.
pub struct FailAt(pub u32);

impl Hinter for FailAt {
    type Error = StubError;

    fn hint(
        &self,
        glyph: &Glyph,
        ppem: u32,
        strategy: &Strategy,
    ) -> Result<HintActions, StubError> {
        if ppem == self.0 {
            return Err(StubError);
        }
        StubHinter.hint(glyph, ppem, strategy).map_err(|e| match e {})
    }
}
