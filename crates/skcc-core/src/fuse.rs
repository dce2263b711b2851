//! Per-cell fusion of the four seasonal samples.
//!
//! Input layers are labelled by the northern-hemisphere season they depict.
//! Cells in the southern half of the raster have their seasons swapped so
//! that "summer" always means the local warm half-year.
//!
//! The hemisphere is decided from the cell's row-major index alone: cells
//! before the midpoint of the buffer are northern. No latitude metadata is
//! consulted, so this only matches the equator for an equirectangular map
//! with an even number of rows.

use crate::color::Color;
use crate::error::Result;
use crate::profile::InputColorProfile;

/// Decoded seasonal values for one cell. Values are zero when `ignored`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSample {
    /// °C.
    pub temp_summer: f64,
    /// °C.
    pub temp_winter: f64,
    pub precip_summer: f64,
    pub precip_winter: f64,
    pub ignored: bool,
}

impl CellSample {
    pub fn new(temp_summer: f64, temp_winter: f64, precip_summer: f64, precip_winter: f64) -> Self {
        Self { temp_summer, temp_winter, precip_summer, precip_winter, ignored: false }
    }

    pub fn ignored() -> Self {
        Self {
            temp_summer: 0.0,
            temp_winter: 0.0,
            precip_summer: 0.0,
            precip_winter: 0.0,
            ignored: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// Northern iff `index < cell_count / 2`.
    #[inline]
    pub fn of_index(index: usize, cell_count: usize) -> Self {
        if index.saturating_mul(2) < cell_count {
            Hemisphere::Northern
        } else {
            Hemisphere::Southern
        }
    }
}

/// Fuses the four decoded samples of a cell using the two input profiles.
#[derive(Debug, Clone, Copy)]
pub struct PixelFuser<'a> {
    temperature: &'a InputColorProfile,
    precipitation: &'a InputColorProfile,
    cell_count: usize,
}

impl<'a> PixelFuser<'a> {
    pub fn new(
        temperature: &'a InputColorProfile,
        precipitation: &'a InputColorProfile,
        cell_count: usize,
    ) -> Self {
        Self { temperature, precipitation, cell_count }
    }

    /// `colors` are `[temp_ns, temp_nw, precip_ns, precip_nw]`, northern-season labelled.
    ///
    /// The cell is ignored if any one of the four colors is ignored by its
    /// profile; otherwise every color must decode or the call fails.
    pub fn fuse(&self, index: usize, colors: [Color; 4]) -> Result<CellSample> {
        let [t_ns, t_nw, p_ns, p_nw] = colors;
        let ignored = self.temperature.is_ignored(t_ns)
            || self.temperature.is_ignored(t_nw)
            || self.precipitation.is_ignored(p_ns)
            || self.precipitation.is_ignored(p_nw);
        if ignored {
            return Ok(CellSample::ignored());
        }

        let decode = |profile: &InputColorProfile, color| -> Result<f64> {
            Ok(profile.value_of(color)?.unwrap_or_default())
        };
        let t_ns = decode(self.temperature, t_ns)?;
        let t_nw = decode(self.temperature, t_nw)?;
        let p_ns = decode(self.precipitation, p_ns)?;
        let p_nw = decode(self.precipitation, p_nw)?;

        Ok(match Hemisphere::of_index(index, self.cell_count) {
            Hemisphere::Northern => CellSample::new(t_ns, t_nw, p_ns, p_nw),
            Hemisphere::Southern => CellSample::new(t_nw, t_ns, p_nw, p_ns),
        })
    }
}
