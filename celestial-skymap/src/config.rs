use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default magnitude limit for the named-star bitmap.
pub const DEFAULT_NAMED_STAR_MAX_MAGNITUDE: f64 = 2.0;

/// Tunables for [`SkyProjectionPacker`](crate::packer::SkyProjectionPacker).
///
/// Every other packing constant is part of the output format and fixed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackerConfig {
    /// A named star enters the named-star bitmap only when its visual
    /// magnitude is at or below this value (lower is brighter).
    pub named_star_max_magnitude: f64,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            named_star_max_magnitude: DEFAULT_NAMED_STAR_MAX_MAGNITUDE,
        }
    }
}

impl PackerConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path.as_ref())?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.named_star_max_magnitude.is_finite() {
            return Err(Error::Config(format!(
                "named_star_max_magnitude must be finite, got {}",
                self.named_star_max_magnitude
            )));
        }
        Ok(())
    }
}
