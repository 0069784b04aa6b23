//! The 96-bit token identifier.
//!
//! Three 32-bit fields, most significant first:
//!
//! | Bits     | Field     | Encoding                                   |
//! |----------|-----------|--------------------------------------------|
//! | 64..96   | latitude  | `floor((lat + 90) * 1e7)`, 0..=1_800_000_000  |
//! | 32..64   | longitude | `floor((lon + 180) * 1e7)`, 0..=3_600_000_000 |
//! | 0..32    | datetime  | year+2000 (12) · month (4) · day (5) · hour (5) · minute (6) |
//!
//! Consumers sort and compare identifiers numerically, so the field order is
//! part of the format.

use std::fmt;

use crate::error::{Error, Result};
use crate::projection::ProjectionTime;

/// Seven decimal places of a degree.
pub const COORDINATE_PRECISION: f64 = 10_000_000.0;
pub const MAX_QUANTIZED_LATITUDE: u32 = 180 * 10_000_000;
pub const MAX_QUANTIZED_LONGITUDE: u32 = 360 * 10_000_000;

/// Added to the calendar year so 2000 BC maps to zero.
pub const YEAR_OFFSET: i32 = 2000;

const YEAR_BITS: u32 = 12;
const MONTH_BITS: u32 = 4;
const DAY_BITS: u32 = 5;
const HOUR_BITS: u32 = 5;
const MINUTE_BITS: u32 = 6;

const MINUTE_SHIFT: u32 = 0;
const HOUR_SHIFT: u32 = MINUTE_SHIFT + MINUTE_BITS;
const DAY_SHIFT: u32 = HOUR_SHIFT + HOUR_BITS;
const MONTH_SHIFT: u32 = DAY_SHIFT + DAY_BITS;
const YEAR_SHIFT: u32 = MONTH_SHIFT + MONTH_BITS;

const _: () = assert!(YEAR_SHIFT + YEAR_BITS == 32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u128);

impl TokenId {
    pub fn from_parts(latitude: u32, longitude: u32, datetime: u32) -> Self {
        Self(datetime as u128 | (longitude as u128) << 32 | (latitude as u128) << 64)
    }

    pub fn value(self) -> u128 {
        self.0
    }

    pub fn latitude(self) -> u32 {
        (self.0 >> 64) as u32
    }

    pub fn longitude(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub fn datetime(self) -> u32 {
        self.0 as u32
    }
}

impl From<TokenId> for u128 {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build the identifier for an observer position and time.
pub fn token_id(latitude: f64, longitude: f64, time: &ProjectionTime) -> Result<TokenId> {
    Ok(TokenId::from_parts(
        quantize_latitude(latitude)?,
        quantize_longitude(longitude)?,
        quantize_datetime(time)?,
    ))
}

pub fn quantize_latitude(latitude: f64) -> Result<u32> {
    let q = ((latitude + 90.0) * COORDINATE_PRECISION).floor();
    if !(0.0..=MAX_QUANTIZED_LATITUDE as f64).contains(&q) {
        return Err(Error::LatitudeOutOfRange { value: latitude });
    }
    check_width("latitude", 32, q as i64)
}

pub fn quantize_longitude(longitude: f64) -> Result<u32> {
    let q = ((longitude + 180.0) * COORDINATE_PRECISION).floor();
    if !(0.0..=MAX_QUANTIZED_LONGITUDE as f64).contains(&q) {
        return Err(Error::LongitudeOutOfRange { value: longitude });
    }
    check_width("longitude", 32, q as i64)
}

pub fn quantize_datetime(time: &ProjectionTime) -> Result<u32> {
    let year = check_width("year", YEAR_BITS, time.year as i64 + YEAR_OFFSET as i64)?;
    let month = check_width("month", MONTH_BITS, time.month as i64)?;
    let day = check_width("day", DAY_BITS, time.day as i64)?;
    let hour = check_width("hour", HOUR_BITS, time.hour as i64)?;
    let minute = check_width("minute", MINUTE_BITS, time.minute as i64)?;

    Ok(year << YEAR_SHIFT
        | month << MONTH_SHIFT
        | day << DAY_SHIFT
        | hour << HOUR_SHIFT
        | minute << MINUTE_SHIFT)
}

/// Inverse of [`quantize_datetime`].
pub fn decode_datetime(datetime: u32) -> Result<ProjectionTime> {
    let field = |shift: u32, bits: u32| (datetime >> shift) & ((1 << bits) - 1);
    ProjectionTime::new(
        field(YEAR_SHIFT, YEAR_BITS) as i32 - YEAR_OFFSET,
        field(MONTH_SHIFT, MONTH_BITS) as u8,
        field(DAY_SHIFT, DAY_BITS) as u8,
        field(HOUR_SHIFT, HOUR_BITS) as u8,
        field(MINUTE_SHIFT, MINUTE_BITS) as u8,
    )
}

fn check_width(field: &'static str, bits: u32, value: i64) -> Result<u32> {
    if value < 0 || value >= 1i64 << bits {
        return Err(Error::FieldOverflow { field, bits, value });
    }
    Ok(value as u32)
}
