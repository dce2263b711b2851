//! Built-in profile tables.
//!
//! These values are part of the output format: maps produced with the
//! default profiles must stay pixel-identical across releases.

use crate::classify::Mode;
use crate::color::Color;

use super::{InputColorProfile, OutputColorProfile};

/// Ocean / ignored color, both as the default input ignore color and the
/// default output color for ignored cells.
pub const OCEAN_COLOR: Color = Color::new(107, 165, 210);

/// Default output color for codes an incomplete output profile cannot resolve.
pub const UNKNOWN_COLOR: Color = Color::BLACK;

/// Köppen-Geiger code → output color.
pub const KOPPEN_COLORS: &[(&str, [u8; 3])] = &[
    ("Af", [11, 36, 250]),
    ("As", [76, 171, 247]),
    ("Aw", [76, 171, 247]),
    ("Am", [21, 123, 251]),
    ("Cfa", [199, 253, 92]),
    ("Csa", [255, 253, 56]),
    ("Cwa", [153, 253, 154]),
    ("Cfb", [109, 253, 70]),
    ("Csb", [198, 197, 41]),
    ("Cwb", [103, 197, 104]),
    ("Cfc", [60, 197, 35]),
    ("Csc", [198, 197, 41]),
    ("Cwc", [103, 197, 104]),
    ("Dfa", [45, 255, 254]),
    ("Dsa", [252, 40, 251]),
    ("Dwa", [172, 179, 253]),
    ("Dfb", [66, 200, 252]),
    ("Dsb", [196, 29, 197]),
    ("Dwb", [92, 122, 216]),
    ("Dfc", [16, 126, 124]),
    ("Dsc", [149, 55, 147]),
    ("Dwc", [77, 84, 178]),
    ("Dfd", [6, 69, 93]),
    ("Dsd", [149, 101, 148]),
    ("Dwd", [50, 14, 133]),
    ("ET", [178, 178, 178]),
    ("EF", [104, 104, 104]),
    ("BSh", [243, 162, 39]),
    ("BSk", [254, 218, 108]),
    ("BWh", [251, 13, 27]),
    ("BWk", [252, 151, 151]),
];

/// Holdridge life zone → output color, coldest band first, driest zone first
/// within a band. Order matches [`crate::classify::LifeZone`].
pub const HOLDRIDGE_COLORS: &[(&str, [u8; 3])] = &[
    ("Ice", [255, 255, 255]),
    ("Polar desert", [224, 224, 224]),
    ("Subpolar dry tundra", [128, 128, 128]),
    ("Subpolar moist tundra", [96, 128, 128]),
    ("Subpolar wet tundra", [64, 128, 128]),
    ("Subpolar rain tundra", [32, 128, 192]),
    ("Boreal desert", [160, 160, 128]),
    ("Boreal dry scrub", [128, 160, 128]),
    ("Boreal moist forest", [96, 160, 128]),
    ("Boreal wet forest", [64, 160, 144]),
    ("Boreal rain forest", [32, 160, 192]),
    ("Cool temperate desert", [192, 192, 128]),
    ("Cool temperate desert scrub", [160, 192, 128]),
    ("Cool temperate steppe", [128, 192, 128]),
    ("Cool temperate moist forest", [96, 192, 128]),
    ("Cool temperate wet forest", [64, 192, 144]),
    ("Cool temperate rain forest", [32, 192, 192]),
    ("Warm temperate desert", [224, 224, 128]),
    ("Warm temperate desert scrub", [192, 224, 128]),
    ("Warm temperate thorn scrub", [160, 224, 128]),
    ("Warm temperate dry forest", [128, 224, 128]),
    ("Warm temperate moist forest", [96, 224, 128]),
    ("Warm temperate wet forest", [64, 224, 144]),
    ("Warm temperate rain forest", [32, 224, 192]),
    ("Subtropical desert", [240, 240, 128]),
    ("Subtropical desert scrub", [208, 240, 128]),
    ("Subtropical thorn woodland", [176, 240, 128]),
    ("Subtropical dry forest", [144, 240, 128]),
    ("Subtropical moist forest", [112, 240, 128]),
    ("Subtropical wet forest", [80, 240, 144]),
    ("Subtropical rain forest", [48, 240, 192]),
    ("Tropical desert", [255, 255, 128]),
    ("Tropical desert scrub", [224, 255, 128]),
    ("Tropical thorn woodland", [192, 255, 128]),
    ("Tropical very dry forest", [160, 255, 128]),
    ("Tropical dry forest", [128, 255, 128]),
    ("Tropical moist forest", [96, 255, 128]),
    ("Tropical wet forest", [64, 255, 144]),
    ("Tropical rain forest", [32, 255, 160]),
];

/// Temperature legend color → °C.
pub const TEMPERATURE_COLORS: &[([u8; 3], f64)] = &[
    ([160, 0, 65], 38.0),
    ([210, 60, 80], 31.0),
    ([245, 110, 65], 25.0),
    ([250, 175, 95], 20.0),
    ([255, 225, 140], 14.0),
    ([230, 245, 150], 5.0),
    ([170, 220, 165], -5.0),
    ([100, 195, 165], -18.0),
    ([50, 135, 190], -32.0),
    ([95, 80, 160], -40.0),
];

/// Precipitation legend color → monthly amount.
pub const PRECIPITATION_COLORS: &[([u8; 3], f64)] = &[
    ([135, 0, 180], 300.0),
    ([130, 60, 200], 170.0),
    ([105, 70, 200], 105.0),
    ([60, 60, 180], 55.0),
    ([70, 95, 150], 30.0),
    ([55, 85, 100], 15.0),
    ([35, 50, 50], 7.5),
    ([20, 20, 20], 2.5),
];

/// Default temperature profile: the legend above, ocean ignored, no default.
pub fn temperature_profile() -> InputColorProfile {
    InputColorProfile::from_table(TEMPERATURE_COLORS, &[OCEAN_COLOR])
}

/// Default precipitation profile: the legend above, ocean ignored, no default.
pub fn precipitation_profile() -> InputColorProfile {
    InputColorProfile::from_table(PRECIPITATION_COLORS, &[OCEAN_COLOR])
}

/// Default output profile for `mode`, with ocean and unknown colors.
pub fn output_profile(mode: Mode) -> OutputColorProfile {
    let table = match mode {
        Mode::Koppen => KOPPEN_COLORS,
        Mode::Holdridge => HOLDRIDGE_COLORS,
    };
    let mut b = OutputColorProfile::builder(mode);
    for &(code, rgb) in table {
        b.insert_code(code, Color(rgb));
    }
    b.build()
}
