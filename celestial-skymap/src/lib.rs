//! Compact on-chain encoding of observer sky projections.
//!
//! A sky projection is what an observer at a given latitude, longitude and
//! UTC minute sees: the constellations above the horizon and, for each, the
//! figure stars placed on a drawing canvas. This crate packs a projection
//! into the fixed-layout tuple a ledger contract stores, deterministically
//! and with bounded work per call.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | [`ConstellationFigures`], [`StarNames`], and the [`SkyCatalog`] bundle |
//! | [`projection`] | [`RawProjection`], [`normalize`], [`SkyProjection`], timestamps |
//! | [`packer`] | [`SkyProjectionPacker`] and the [`PackedProjection`] tuple |
//! | [`config`] | [`PackerConfig`] |
//!
//! # Quick Start
//!
//! ```ignore
//! use celestial_skymap::{RawProjection, SkyCatalog};
//!
//! let catalog = SkyCatalog::load("constellationship.fab", "star_names.txt")?;
//! let raw = RawProjection::from_file("projection.json")?;
//!
//! let packed = catalog.packer().pack_raw(raw)?;
//! println!("token {}", packed.token_id);
//! ```
//!
//! # Sharing
//!
//! Catalogs are immutable after load and every pack call only reads them, so
//! one [`SkyCatalog`] built at startup can serve any number of threads.
//!
//! # Features
//!
//! - **`cli`**: builds the `skymap-pack` binary, which loads both catalogs and
//!   prints catalog sizes or the packed tuple of a projection file as JSON.

pub mod catalog;
pub mod config;
pub mod error;
pub mod packer;
pub mod projection;

pub use catalog::{ConstellationCode, ConstellationFigures, SkyCatalog, StarId, StarNames};
pub use config::PackerConfig;
pub use error::{Error, Result};
pub use packer::{PackedProjection, SkyProjectionPacker, TokenId};
pub use projection::{normalize, RawProjection, SkyProjection};
