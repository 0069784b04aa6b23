//! Wire model of a projection as produced by the upstream sky service.
//!
//! ```json
//! {
//!   "latitude": 34.0194736,
//!   "longitude": -119.0355556,
//!   "date_iso8601": "2023-12-30T15:55+00:00",
//!   "constellations": [
//!     { "code": "Ori", "stars": [ { "id": 27989, "x": 512, "y": 301, "m": 0.45 } ] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{ConstellationCode, StarId};
use crate::error::Result;

/// A star as placed on the canvas of one projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: StarId,
    /// Canvas column.
    pub x: i32,
    /// Canvas row.
    pub y: i32,
    /// Visual magnitude, lower is brighter.
    pub m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    pub code: ConstellationCode,
    #[serde(default)]
    pub stars: Vec<Star>,
}

impl Constellation {
    pub fn star(&self, id: StarId) -> Option<&Star> {
        self.stars.iter().find(|s| s.id == id)
    }
}

/// Projection exactly as received, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProjection {
    pub latitude: f64,
    pub longitude: f64,
    pub date_iso8601: String,
    #[serde(default)]
    pub constellations: Vec<Constellation>,
}

impl RawProjection {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path.as_ref())?)
    }
}
