//! Star coordinate array and the named-star side channel.
//!
//! Visible stars are emitted in catalog order (constellation load order, then
//! ascending star id), so a star's index in the coordinate array is fixed by
//! the catalog and the visible set alone. Named stars bright enough to be
//! labelled are reported twice: a bit in the named-star bitmap at their
//! named-catalog position, and their coordinate-array index, listed in
//! named-catalog order.

use std::collections::HashMap;

use num_bigint::BigUint;

use super::VisibleSky;
use crate::catalog::{ConstellationFigures, StarId, StarNames};

const COORD_MASK: i32 = 0xFFF;

/// `x` in bits 12..24, `y` in bits 0..12. Each axis keeps only its low 12
/// bits, so values wrap rather than saturate.
pub fn pack_coords(x: i32, y: i32) -> u32 {
    ((x & COORD_MASK) as u32) << 12 | (y & COORD_MASK) as u32
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarCoords {
    pub coords: Vec<u32>,
    pub named_bitmap: BigUint,
    pub named_indices: Vec<u32>,
}

pub fn star_coords(
    figures: &ConstellationFigures,
    names: &StarNames,
    visible: &VisibleSky<'_>,
    named_star_max_magnitude: f64,
) -> StarCoords {
    let mut coords: Vec<u32> = Vec::new();
    // named star id -> index in coords; a star drawn in two figures keeps
    // its later index
    let mut found: HashMap<StarId, u32> = HashMap::new();

    for (code, figure) in figures.iter() {
        if !visible.has_constellation(code) {
            continue;
        }
        for &star_id in figure.sorted_star_ids() {
            let Some(star) = visible.star(code, star_id) else {
                continue;
            };
            coords.push(pack_coords(star.x, star.y));
            if names.contains(star_id) && star.m <= named_star_max_magnitude {
                found.insert(star_id, (coords.len() - 1) as u32);
            }
        }
    }

    let mut named_bitmap = BigUint::default();
    let mut named_indices = Vec::with_capacity(found.len());
    for (bit, star_id) in names.iter().enumerate() {
        if let Some(&index) = found.get(&star_id) {
            named_bitmap.set_bit(bit as u64, true);
            named_indices.push(index);
        }
    }

    StarCoords {
        coords,
        named_bitmap,
        named_indices,
    }
}
