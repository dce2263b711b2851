//! In-memory raster layers as handed over by the image reader.
//!
//! A [`ColorRaster`] stores interleaved 8-bit samples in row-major order
//! together with the declared meaning of each channel, so that layouts such
//! as BGR or RGBA can be normalised by [`crate::bands::BandExtractor`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};

/// Declared meaning of one interleaved channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
    Luma,
    Other,
}

impl Channel {
    /// Parse a single-letter band code (`R`, `G`, `B`, `A`, `L`); anything else is `Other`.
    pub fn from_code(code: char) -> Self {
        match code.to_ascii_uppercase() {
            'R' => Channel::Red,
            'G' => Channel::Green,
            'B' => Channel::Blue,
            'A' => Channel::Alpha,
            'L' => Channel::Luma,
            _ => Channel::Other,
        }
    }

    /// Parse a band layout string such as `"RGB"`, `"BGRA"` or `"LA"`.
    pub fn layout(codes: &str) -> Vec<Channel> {
        codes.chars().map(Channel::from_code).collect()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
            Channel::Luma => "luma",
            Channel::Other => "unnamed",
        };
        f.write_str(name)
    }
}

/// The four seasonal input layers, in the order they are fused.
///
/// "Northern summer" is the half-year that is summer in the northern
/// hemisphere; for southern cells the fuser swaps the roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    TemperatureNorthernSummer,
    TemperatureNorthernWinter,
    PrecipitationNorthernSummer,
    PrecipitationNorthernWinter,
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::TemperatureNorthernSummer,
        Layer::TemperatureNorthernWinter,
        Layer::PrecipitationNorthernSummer,
        Layer::PrecipitationNorthernWinter,
    ];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::TemperatureNorthernSummer => "northern-summer temperature",
            Layer::TemperatureNorthernWinter => "northern-winter temperature",
            Layer::PrecipitationNorthernSummer => "northern-summer precipitation",
            Layer::PrecipitationNorthernWinter => "northern-winter precipitation",
        };
        f.write_str(name)
    }
}

/// Interleaved 8-bit raster, row-major, `width × height × channels.len()` samples.
#[derive(Debug, Clone)]
pub struct ColorRaster {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: Vec<Channel>,
}

impl ColorRaster {
    pub fn new(width: u32, height: u32, channels: Vec<Channel>, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels.len();
        if data.len() != expected {
            return Err(Error::RasterSize { expected, actual: data.len() });
        }
        Ok(Self { data, width, height, channels })
    }

    /// Plain 3-channel RGB raster.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, Channel::layout("RGB"), data)
    }

    /// RGB raster built from one color per cell.
    pub fn from_colors(width: u32, height: u32, colors: &[Color]) -> Result<Self> {
        let data = colors.iter().flat_map(|c| c.0).collect();
        Self::rgb(width, height, data)
    }

    /// RGB raster filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let cells = width as usize * height as usize;
        Self {
            data: color.0.repeat(cells),
            width,
            height,
            channels: Channel::layout("RGB"),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Raw interleaved samples of the cell at row-major `index`.
    #[inline]
    pub fn pixel(&self, index: usize) -> &[u8] {
        let n = self.channels.len();
        &self.data[index * n..(index + 1) * n]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
