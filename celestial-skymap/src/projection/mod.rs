//! Observer sky projections.
//!
//! A [`RawProjection`] arrives from the sky service. [`normalize`] checks it
//! against the figure catalog and returns a [`SkyProjection`] in which every
//! star is an endpoint of at least one edge of its constellation and every
//! constellation has at least one star. Stars that fail the edge test are
//! orphans and are dropped, as are constellations left empty.

pub mod raw;
pub mod time;

pub use raw::{Constellation, RawProjection, Star};
pub use time::{parse_iso8601, ProjectionTime};

use tracing::{debug, warn};

use crate::catalog::ConstellationFigures;
use crate::error::Result;

/// A normalized projection, ready for packing.
///
/// Only [`normalize`] builds one, so every star is an edge endpoint and no
/// constellation is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyProjection {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) time: ProjectionTime,
    pub(crate) constellations: Vec<Constellation>,
}

impl SkyProjection {
    /// Observer latitude in degrees, as received.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Observer longitude in degrees, as received.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn time(&self) -> &ProjectionTime {
        &self.time
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    pub fn constellation(&self, code: &str) -> Option<&Constellation> {
        self.constellations.iter().find(|c| c.code == code)
    }

    pub fn star_count(&self) -> usize {
        self.constellations.iter().map(|c| c.stars.len()).sum()
    }

    /// See [`ProjectionTime::format_date`].
    pub fn format_date(&self) -> String {
        self.time.format_date()
    }
}

/// Parse the timestamp and drop orphan stars and empty constellations.
///
/// Coordinates are carried through unchecked; range validation belongs to
/// the packer. Constellations whose code is not in `figures` have no edges,
/// so all their stars are orphans and the constellation is dropped.
///
/// # Errors
/// Returns [`Error::InvalidDate`](crate::Error::InvalidDate) if the timestamp
/// does not parse or falls outside the supported year span.
pub fn normalize(raw: RawProjection, figures: &ConstellationFigures) -> Result<SkyProjection> {
    let time = parse_iso8601(&raw.date_iso8601)?;

    let mut orphans = 0usize;
    let constellations: Vec<Constellation> = raw
        .constellations
        .into_iter()
        .filter_map(|mut constellation| {
            let Some(figure) = figures.figure(&constellation.code) else {
                warn!(
                    code = %constellation.code,
                    "dropping constellation unknown to figure catalog"
                );
                return None;
            };
            let before = constellation.stars.len();
            constellation.stars.retain(|star| figure.contains_star(star.id));
            orphans += before - constellation.stars.len();
            (!constellation.stars.is_empty()).then_some(constellation)
        })
        .collect();

    debug!(
        constellations = constellations.len(),
        orphan_stars = orphans,
        "normalized projection"
    );

    Ok(SkyProjection {
        latitude: raw.latitude,
        longitude: raw.longitude,
        time,
        constellations,
    })
}
