//! Error type for the decode-and-classify engine.
//!
//! Every variant is fatal to a classification run: the batch driver stops at
//! the first error and no output raster is produced. Duplicate profile
//! entries are not errors; see [`crate::profile::ProfileWarning`].

use thiserror::Error;

use crate::classify::Mode;
use crate::color::Color;
use crate::raster::{Channel, Layer};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A profile or raster specified a channel value outside [0, 255].
    #[error("invalid RGB channel value {value}: must be within 0..=255")]
    InvalidChannelValue { value: i64 },

    /// A sample color has no mapping, is not ignored, and the profile has no default.
    #[error("invalid color in input data (did not match input profile): {0}")]
    UnmappedColor(Color),

    /// An input raster has no red, green or blue channel.
    #[error("no {channel} color channel in the {layer} input image")]
    MissingChannel { layer: Layer, channel: Channel },

    /// The assembled classification code is absent from the output profile.
    #[error("classification {0:?} has no color in the output profile")]
    UnknownClassification(String),

    /// A profile line did not match the expected `label : (r, g, b) : value` shape.
    #[error("invalid line {line_no} in profile: {line:?}")]
    InvalidProfileLine { line_no: usize, line: String },

    /// A profile value could not be read as a number or the ignore marker.
    #[error("invalid value {value:?} on line {line_no} of input profile")]
    InvalidProfileValue { line_no: usize, value: String },

    /// An output profile key is not part of the active taxonomy.
    #[error("invalid {mode} class in output profile: {key:?}")]
    InvalidClassKey { mode: Mode, key: String },

    /// The four input rasters do not share the same dimensions.
    #[error("dimension mismatch: {layer} input is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    DimensionMismatch {
        layer: Layer,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A raster's sample buffer does not match its declared size and channel count.
    #[error("raster buffer holds {actual} samples, expected {expected}")]
    RasterSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
