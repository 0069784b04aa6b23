//! Visibility bitmaps.
//!
//! Bit positions follow catalog order: constellation `i` in load order owns
//! bit `i` of the constellation mask; the star-edge bitmap walks every
//! constellation in load order and every star of its figure in ascending id
//! order, one bit per star, without resetting between constellations.

use num_bigint::BigUint;

use super::VisibleSky;
use crate::catalog::ConstellationFigures;

/// Bit `i` is set when catalog code `i` is among the visible constellations.
pub fn visible_constellations(figures: &ConstellationFigures, visible: &VisibleSky<'_>) -> u128 {
    figures
        .codes()
        .iter()
        .enumerate()
        .filter(|(_, code)| visible.has_constellation(code))
        .fold(0u128, |mask, (i, _)| mask | 1u128 << i)
}

/// One bit per catalog figure star, set when that star is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarEdgeBitmap {
    bits: BigUint,
    len: usize,
}

impl StarEdgeBitmap {
    pub fn build(figures: &ConstellationFigures, visible: &VisibleSky<'_>) -> Self {
        let mut bits = BigUint::default();
        let mut offset = 0u64;

        for (code, figure) in figures.iter() {
            for &star_id in figure.sorted_star_ids() {
                if visible.star(code, star_id).is_some() {
                    bits.set_bit(offset, true);
                }
                offset += 1;
            }
        }

        Self {
            bits,
            len: offset as usize,
        }
    }

    /// Number of bit positions, visible or not.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_set(&self, position: usize) -> bool {
        self.bits.bit(position as u64)
    }

    pub fn count_visible(&self) -> u64 {
        self.bits.count_ones()
    }

    /// Little-endian bytes, `ceil(len / 8)` long: byte 0 holds bits 0..8.
    /// An empty bitmap yields no bytes at all.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.len == 0 {
            return Vec::new();
        }
        let mut bytes = self.bits.to_bytes_le();
        bytes.resize(self.len.div_ceil(8), 0);
        bytes
    }
}
