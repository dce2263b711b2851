//! Seasonal climate classification from color-coded rasters.
//!
//! Four rasters (summer and winter temperature, summer and winter
//! precipitation) are decoded through color legends into numbers, each cell
//! is classified under the Köppen-Geiger or Holdridge scheme, and the result
//! is painted back into a color raster.
//!
//! ```text
//! ColorRaster ×4 → BandExtractor → PixelFuser → Mode::classify → OutputMapper → ClimateMap
//! ```
//!
//! Enable the `threading` feature to classify cells in parallel with rayon.

pub mod bands;
pub mod classify;
pub mod color;
pub mod error;
pub mod fuse;
pub mod mapper;
pub mod pipeline;
pub mod profile;
pub mod raster;

pub use classify::{Classification, Mode};
pub use color::Color;
pub use error::{Error, Result};
pub use mapper::UnresolvedPolicy;
pub use pipeline::{classify_map, ClassCounts, ClimateMap, Profiles, SeasonalLayers};
pub use profile::{InputColorProfile, OutputColorProfile};
pub use raster::{Channel, ColorRaster, Layer};
