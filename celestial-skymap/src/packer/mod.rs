//! Projection packing.
//!
//! [`SkyProjectionPacker::pack`] turns a normalized [`SkyProjection`] into the
//! six values the ledger's mint call takes:
//!
//! | # | Value | Module |
//! |---|-------|--------|
//! | 1 | 96-bit token id (latitude · longitude · datetime) | [`token`] |
//! | 2 | constellation visibility mask, one bit per catalog code | [`bitmaps`] |
//! | 3 | star-edge visibility bitmap as little-endian bytes | [`bitmaps`] |
//! | 4 | named-star bitmap, one bit per named-catalog star | [`coords`] |
//! | 5 | coordinate-array indices of the named stars | [`coords`] |
//! | 6 | packed 24-bit star coordinates | [`coords`] |
//!
//! Packing is pure: no I/O, no shared mutable state, and identical input
//! always yields identical output. The only failures are out-of-range
//! observer coordinates and the defensive field-width checks on the token.

pub mod bitmaps;
pub mod coords;
pub mod token;

use std::collections::HashMap;
use std::fmt::Display;

use num_bigint::BigUint;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use tracing::debug;

pub use bitmaps::StarEdgeBitmap;
pub use coords::pack_coords;
pub use token::TokenId;

use crate::catalog::{ConstellationFigures, StarId, StarNames};
use crate::config::PackerConfig;
use crate::error::Result;
use crate::projection::{normalize, Constellation, RawProjection, SkyProjection, Star};

/// The encoded tuple, in mint-call argument order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedProjection {
    #[serde(serialize_with = "as_decimal")]
    pub token_id: TokenId,
    #[serde(serialize_with = "as_decimal")]
    pub constellation_mask: u128,
    #[serde(serialize_with = "as_hex")]
    pub star_edge_mask: Vec<u8>,
    #[serde(serialize_with = "as_decimal")]
    pub named_stars_bitmap: BigUint,
    pub named_star_indices: Vec<u32>,
    pub star_coords: Vec<u32>,
}

impl PackedProjection {
    /// `0x`-prefixed lowercase hex of [`PackedProjection::star_edge_mask`].
    pub fn star_edge_mask_hex(&self) -> String {
        to_hex(&self.star_edge_mask)
    }
}

/// Packs projections against a fixed pair of catalogs.
#[derive(Debug, Clone, Copy)]
pub struct SkyProjectionPacker<'a> {
    figures: &'a ConstellationFigures,
    names: &'a StarNames,
    config: PackerConfig,
}

impl<'a> SkyProjectionPacker<'a> {
    pub fn new(figures: &'a ConstellationFigures, names: &'a StarNames) -> Self {
        Self::with_config(figures, names, PackerConfig::default())
    }

    pub fn with_config(
        figures: &'a ConstellationFigures,
        names: &'a StarNames,
        config: PackerConfig,
    ) -> Self {
        Self {
            figures,
            names,
            config,
        }
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Encode one normalized projection.
    ///
    /// # Errors
    /// [`Error::LatitudeOutOfRange`](crate::Error::LatitudeOutOfRange) or
    /// [`Error::LongitudeOutOfRange`](crate::Error::LongitudeOutOfRange) when
    /// the observer lies outside [-90, 90] × [-180, 180]. Nothing is returned
    /// on failure.
    pub fn pack(&self, projection: &SkyProjection) -> Result<PackedProjection> {
        let token_id = token::token_id(
            projection.latitude(),
            projection.longitude(),
            projection.time(),
        )?;

        let visible = VisibleSky::new(projection.constellations());
        let constellation_mask = bitmaps::visible_constellations(self.figures, &visible);
        let star_edges = StarEdgeBitmap::build(self.figures, &visible);
        let coords = coords::star_coords(
            self.figures,
            self.names,
            &visible,
            self.config.named_star_max_magnitude,
        );

        debug!(
            token_id = %token_id,
            constellations = constellation_mask.count_ones(),
            star_bits = star_edges.len(),
            stars = coords.coords.len(),
            named_stars = coords.named_indices.len(),
            "packed projection"
        );

        Ok(PackedProjection {
            token_id,
            constellation_mask,
            star_edge_mask: star_edges.to_bytes(),
            named_stars_bitmap: coords.named_bitmap,
            named_star_indices: coords.named_indices,
            star_coords: coords.coords,
        })
    }

    /// Normalize against this packer's figure catalog, then pack.
    pub fn pack_raw(&self, raw: RawProjection) -> Result<PackedProjection> {
        self.pack(&normalize(raw, self.figures)?)
    }

    /// Pack independent projections in parallel. Results keep input order.
    pub fn pack_batch(&self, projections: &[SkyProjection]) -> Vec<Result<PackedProjection>> {
        projections.par_iter().map(|p| self.pack(p)).collect()
    }
}

/// Per-call lookup of the visible constellations and their stars.
///
/// When a code or a star id repeats in the input, the first occurrence wins.
pub struct VisibleSky<'a> {
    stars: HashMap<&'a str, HashMap<StarId, &'a Star>>,
}

impl<'a> VisibleSky<'a> {
    pub fn new(constellations: &'a [Constellation]) -> Self {
        let mut stars: HashMap<&'a str, HashMap<StarId, &'a Star>> = HashMap::new();
        for constellation in constellations {
            if stars.contains_key(constellation.code.as_str()) {
                continue;
            }
            let mut by_id = HashMap::with_capacity(constellation.stars.len());
            for star in &constellation.stars {
                by_id.entry(star.id).or_insert(star);
            }
            stars.insert(constellation.code.as_str(), by_id);
        }
        Self { stars }
    }

    pub fn has_constellation(&self, code: &str) -> bool {
        self.stars.contains_key(code)
    }

    pub fn star(&self, code: &str, star_id: StarId) -> Option<&'a Star> {
        self.stars.get(code)?.get(&star_id).copied()
    }
}

fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(2 + bytes.len() * 2);
    s.push_str("0x");
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

fn as_decimal<T: Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn as_hex<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(bytes))
}
