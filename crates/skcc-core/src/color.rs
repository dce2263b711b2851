use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An 8-bit RGB triple. Used as an immutable lookup key by the color profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Build a color from wide channel values, rejecting anything outside [0, 255].
    pub fn from_channels(r: i64, g: i64, b: i64) -> Result<Self> {
        let narrow = |v: i64| u8::try_from(v).map_err(|_| Error::InvalidChannelValue { value: v });
        Ok(Self([narrow(r)?, narrow(g)?, narrow(b)?]))
    }

    #[inline]
    pub fn r(self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(self) -> u8 {
        self.0[2]
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self(rgb)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        c.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r(), self.g(), self.b())
    }
}
