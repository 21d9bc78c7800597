//! Error types for QR generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing a styled QR raster.
///
/// Every failure is reported for a whole generation attempt; nothing is
/// reported per module.
#[derive(Error, Debug)]
pub enum Error {
    /// The text to encode is empty or whitespace only.
    #[error("Nothing to encode: text is empty")]
    EmptyInput,

    /// Dot color is not a six digit hex RGB value.
    #[error("Invalid dot color '{0}': expected six hex digits like #1a2b3c")]
    InvalidColor(String),

    /// Pattern name does not match any known style.
    #[error("Unknown pattern style '{0}'")]
    UnknownPattern(String),

    /// Canvas dimensions cannot hold a QR grid.
    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    /// The supplied logo is not an image.
    #[error("Logo is not a supported image: {0}")]
    UnsupportedAsset(String),

    /// The logo looked like an image but failed to decode.
    #[error("Failed to decode logo: {0}")]
    Decode(#[source] image::ImageError),

    /// The drawing surface could not be allocated.
    #[error("Could not allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    /// The matrix encoder rejected the text.
    #[error("QR encoding failed: {0}")]
    Encode(String),

    /// The finished raster could not be serialized.
    #[error("Failed to encode PNG: {0}")]
    Png(#[source] image::ImageError),

    /// I/O error while saving output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The config file exists but could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file could not be parsed.
    #[error("Failed to parse config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
