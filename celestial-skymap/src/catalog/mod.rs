//! Static reference catalogs.
//!
//! - [`figures`]: constellation stick figures with their edges and sorted star ids
//! - [`names`]: the ordered named-star set behind the named-star bitmap
//!
//! Both are loaded once and never mutated. [`SkyCatalog`] bundles them so a
//! single value can be built at startup and shared by reference across
//! threads while projections are packed.

pub mod figures;
pub mod names;

use std::path::Path;

pub use figures::{ConstellationFigures, Figure, MAX_CONSTELLATIONS};
pub use names::StarNames;

use crate::config::PackerConfig;
use crate::error::Result;
use crate::packer::SkyProjectionPacker;

/// Catalog star identifier (Hipparcos number).
pub type StarId = u32;

/// Short constellation token such as `"Ori"`.
pub type ConstellationCode = String;

#[derive(Debug, Clone, Default)]
pub struct SkyCatalog {
    pub figures: ConstellationFigures,
    pub names: StarNames,
}

impl SkyCatalog {
    pub fn new(figures: ConstellationFigures, names: StarNames) -> Self {
        Self { figures, names }
    }

    pub fn load(figures_path: impl AsRef<Path>, names_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            figures: ConstellationFigures::from_file(figures_path)?,
            names: StarNames::from_file(names_path)?,
        })
    }

    pub fn packer(&self) -> SkyProjectionPacker<'_> {
        SkyProjectionPacker::new(&self.figures, &self.names)
    }

    pub fn packer_with_config(&self, config: PackerConfig) -> SkyProjectionPacker<'_> {
        SkyProjectionPacker::with_config(&self.figures, &self.names, config)
    }
}
