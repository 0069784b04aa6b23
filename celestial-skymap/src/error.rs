use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("latitude out of range: {value} is outside [-90, 90]")]
    LatitudeOutOfRange { value: f64 },

    #[error("longitude out of range: {value} is outside [-180, 180]")]
    LongitudeOutOfRange { value: f64 },

    /// A quantized token field exceeded its bit slot. Unreachable once the
    /// range checks pass; seeing it means the quantization itself is broken.
    #[error("{field} does not fit in {bits} bits: {value}")]
    FieldOverflow {
        field: &'static str,
        bits: u32,
        value: i64,
    },

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
