//! Hinting strategy parameters.

use serde::Deserialize;

use crate::Error;

/// Read-only configuration shared by every glyph in a run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Strategy {
    /// Units per em of the source outlines.
    #[serde(rename = "UPM")]
    pub upm: f64,
    /// Smallest ppem hinted.
    #[serde(rename = "PPEM_MIN")]
    pub ppem_min: u32,
    /// Largest ppem hinted.
    #[serde(rename = "PPEM_MAX")]
    pub ppem_max: u32,
    /// Lower bound for the per-glyph cutoff: every glyph is hinted at least
    /// up to this size.
    #[serde(rename = "PPEM_MIT")]
    pub ppem_mit: u32,
    /// Pixels of slack required between overlapping stems.
    #[serde(rename = "SPARE_PIXLS")]
    pub spare_pixls: f64,
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            upm: 1000.0,
            ppem_min: 10,
            ppem_max: 36,
            ppem_mit: 20,
            spare_pixls: 3.0,
        }
    }
}

impl Strategy {
    /// Check the parameters for values the sweep cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.upm > 0.0) {
            return Err(Error::InvalidStrategy(format!(
                "UPM must be positive, got {}",
                self.upm
            )));
        }
        if !(self.spare_pixls > 0.0) {
            return Err(Error::InvalidStrategy(format!(
                "SPARE_PIXLS must be positive, got {}",
                self.spare_pixls
            )));
        }
        if self.ppem_mit > self.ppem_max {
            return Err(Error::InvalidStrategy(format!(
                "PPEM_MIT ({}) exceeds PPEM_MAX ({})",
                self.ppem_mit, self.ppem_max
            )));
        }
        Ok(())
    }

    /// Scale factor from font units to pixels at `ppem`.
    pub fn scale(&self, ppem: u32) -> f64 {
        ppem as f64 / self.upm
    }
}

/// A TOML parameter file. Strategy values live in the `[hinting]` table;
/// other tables belong to other tools and are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ParameterFile {
    #[serde(default)]
    pub hinting: Strategy,
}

impl ParameterFile {
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }
}
