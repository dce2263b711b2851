//! Channel-order normalisation for the four input layers.
//!
//! Each layer's band layout is resolved once, when the rasters are opened;
//! per-pixel extraction then only indexes into the interleaved samples.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::raster::{Channel, Layer};

/// Positions of the red, green and blue samples within one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandOrder {
    red: usize,
    green: usize,
    blue: usize,
}

impl BandOrder {
    pub const RGB: BandOrder = BandOrder { red: 0, green: 1, blue: 2 };

    pub fn resolve(layer: Layer, channels: &[Channel]) -> Result<Self> {
        let find = |channel: Channel| {
            channels
                .iter()
                .position(|&c| c == channel)
                .ok_or(Error::MissingChannel { layer, channel })
        };
        Ok(Self {
            red: find(Channel::Red)?,
            green: find(Channel::Green)?,
            blue: find(Channel::Blue)?,
        })
    }

    #[inline]
    pub fn color(&self, pixel: &[u8]) -> Color {
        Color::new(pixel[self.red], pixel[self.green], pixel[self.blue])
    }
}

/// Turns four raw pixels, one per [`Layer`], into four colors.
#[derive(Debug, Clone)]
pub struct BandExtractor {
    orders: [BandOrder; 4],
    passthrough: bool,
}

impl BandExtractor {
    /// Resolve the band layouts of the four layers, in [`Layer::ALL`] order.
    pub fn new(layouts: [&[Channel]; 4]) -> Result<Self> {
        let mut orders = [BandOrder::RGB; 4];
        for ((order, layer), channels) in orders.iter_mut().zip(Layer::ALL).zip(layouts) {
            *order = BandOrder::resolve(layer, channels)?;
        }
        let rgb = [Channel::Red, Channel::Green, Channel::Blue];
        let passthrough = layouts.iter().all(|l| *l == rgb);
        Ok(Self { orders, passthrough })
    }

    /// True when every layer is plain RGB and pixels are copied as-is.
    pub fn is_passthrough(&self) -> bool {
        self.passthrough
    }

    #[inline]
    pub fn extract(&self, pixels: [&[u8]; 4]) -> [Color; 4] {
        if self.passthrough {
            return pixels.map(|p| Color::new(p[0], p[1], p[2]));
        }
        let mut out = [Color::BLACK; 4];
        for ((c, order), p) in out.iter_mut().zip(&self.orders).zip(pixels) {
            *c = order.color(p);
        }
        out
    }
}
