//! Batch driver: four seasonal rasters in, one classification map out.
//!
//! Pipeline per cell:
//!   band extraction → season fusion → classification → output color.
//!
//! Cells are independent. With the `threading` feature they are processed
//! in parallel; results are identical either way. The first failing cell
//! aborts the whole run and no map is returned.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::bands::BandExtractor;
use crate::classify::{Classification, Mode};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::fuse::PixelFuser;
use crate::mapper::{OutputMapper, UnresolvedPolicy};
use crate::profile::{defaults, InputColorProfile, OutputColorProfile};
use crate::raster::{ColorRaster, Layer};

/// The four input layers, labelled by northern-hemisphere season.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalLayers<'a> {
    pub temp_summer: &'a ColorRaster,
    pub temp_winter: &'a ColorRaster,
    pub precip_summer: &'a ColorRaster,
    pub precip_winter: &'a ColorRaster,
}

impl<'a> SeasonalLayers<'a> {
    /// Layers in [`Layer::ALL`] order.
    pub fn as_array(&self) -> [&'a ColorRaster; 4] {
        [self.temp_summer, self.temp_winter, self.precip_summer, self.precip_winter]
    }

    /// Shared dimensions, or [`Error::DimensionMismatch`] naming the first odd layer.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let layers = self.as_array();
        let expected = layers[0].dimensions();
        for (layer, raster) in Layer::ALL.into_iter().zip(layers).skip(1) {
            if raster.dimensions() != expected {
                return Err(Error::DimensionMismatch { layer, expected, actual: raster.dimensions() });
            }
        }
        Ok(expected)
    }
}

/// The three frozen profiles for a run. The output profile fixes the mode.
#[derive(Debug, Clone)]
pub struct Profiles {
    pub temperature: InputColorProfile,
    pub precipitation: InputColorProfile,
    pub output: OutputColorProfile,
}

impl Profiles {
    /// Built-in legends and the built-in output colors for `mode`.
    pub fn defaults(mode: Mode) -> Self {
        Self {
            temperature: defaults::temperature_profile(),
            precipitation: defaults::precipitation_profile(),
            output: defaults::output_profile(mode),
        }
    }

    pub fn mode(&self) -> Mode {
        self.output.mode()
    }
}

/// Number of cells per class in a finished map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub mode: Mode,
    pub ignored: usize,
    pub classes: BTreeMap<String, usize>,
}

impl ClassCounts {
    fn tally(mode: Mode, results: &[Classification]) -> Self {
        let mut per_class: HashMap<Classification, usize> = HashMap::new();
        for r in results {
            *per_class.entry(*r).or_default() += 1;
        }
        let mut ignored = 0;
        let mut classes = BTreeMap::new();
        for (class, n) in per_class {
            match class.code() {
                Some(code) => {
                    classes.insert(code.to_string(), n);
                }
                None => ignored = n,
            }
        }
        Self { mode, ignored, classes }
    }

    pub fn classified(&self) -> usize {
        self.classes.values().sum()
    }
}

/// A finished map: one output color per input cell, row-major.
#[derive(Debug, Clone)]
pub struct ClimateMap {
    pub colors: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub counts: ClassCounts,
}

impl ClimateMap {
    /// Interleaved RGB bytes, ready for an image encoder.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.0).collect()
    }
}

/// Classify every cell of `layers`.
pub fn classify_map(
    layers: &SeasonalLayers<'_>,
    profiles: &Profiles,
    policy: UnresolvedPolicy,
) -> Result<ClimateMap> {
    let (width, height) = layers.dimensions()?;
    let rasters = layers.as_array();
    let extractor = BandExtractor::new(rasters.map(|r| r.channels()))?;
    let cell_count = rasters[0].cell_count();
    let fuser = PixelFuser::new(&profiles.temperature, &profiles.precipitation, cell_count);
    let mapper = OutputMapper::new(&profiles.output, policy);
    let mode = profiles.mode();

    log::debug!(
        "classifying {width}x{height} cells in {mode} mode (band passthrough: {})",
        extractor.is_passthrough()
    );

    let cell = |index: usize| -> Result<(Color, Classification)> {
        let colors = extractor.extract(rasters.map(|r| r.pixel(index)));
        let sample = fuser.fuse(index, colors)?;
        let class = mode.classify(&sample);
        Ok((mapper.map(&class)?, class))
    };

    #[cfg(feature = "threading")]
    let cells: Vec<(Color, Classification)> = {
        use rayon::prelude::*;
        (0..cell_count).into_par_iter().map(cell).collect::<Result<_>>()?
    };
    #[cfg(not(feature = "threading"))]
    let cells: Vec<(Color, Classification)> = (0..cell_count).map(cell).collect::<Result<_>>()?;

    let (colors, classes): (Vec<Color>, Vec<Classification>) = cells.into_iter().unzip();
    let counts = ClassCounts::tally(mode, &classes);
    Ok(ClimateMap { colors, width, height, counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Channel;

    const OCEAN: Color = defaults::OCEAN_COLOR;
    // Default legend entries.
    const T25: Color = Color::new(245, 110, 65);
    const T20: Color = Color::new(250, 175, 95);
    const T5: Color = Color::new(230, 245, 150);
    const TM5: Color = Color::new(170, 220, 165);
    const P105: Color = Color::new(105, 70, 200);
    const P2_5: Color = Color::new(20, 20, 20);
    const P300: Color = Color::new(135, 0, 180);

    struct Fixture {
        ts: ColorRaster,
        tw: ColorRaster,
        ps: ColorRaster,
        pw: ColorRaster,
    }

    impl Fixture {
        fn rgb(w: u32, h: u32, cells: [&[Color]; 4]) -> Self {
            let r = |c: &[Color]| ColorRaster::from_colors(w, h, c).unwrap();
            Self { ts: r(cells[0]), tw: r(cells[1]), ps: r(cells[2]), pw: r(cells[3]) }
        }

        fn layers(&self) -> SeasonalLayers<'_> {
            SeasonalLayers {
                temp_summer: &self.ts,
                temp_winter: &self.tw,
                precip_summer: &self.ps,
                precip_winter: &self.pw,
            }
        }
    }

    #[test]
    fn two_row_map_swaps_seasons_in_south() {
        // Row 0 northern, row 1 southern. Summer layer hot and wet, winter cool and dry.
        let f = Fixture::rgb(
            2,
            2,
            [&[T25, T25, T25, T25], &[T5, T5, T5, T5], &[P105; 4], &[P2_5; 4]],
        );
        let map = classify_map(&f.layers(), &Profiles::defaults(Mode::Koppen), UnresolvedPolicy::Fail)
            .unwrap();
        assert_eq!((map.width, map.height), (2, 2));
        // North: ts=25, tw=5, ps=105, pw=2.5 → C, pw < ps*0.1 → w, ts ≥ 22 → a.
        // South: ts=5, tw=25, ps=2.5, pw=105 → C, ps < pw*0.33 and < 40 → s, ts < 13 and tw ≥ 10 → b.
        let out = defaults::output_profile(Mode::Koppen);
        let cwa = out.color_of("Cwa").unwrap();
        let csb = out.color_of("Csb").unwrap();
        assert_eq!(map.colors, vec![cwa, cwa, csb, csb]);
        assert_eq!(map.counts.classes.get("Cwa"), Some(&2));
        assert_eq!(map.counts.classes.get("Csb"), Some(&2));
        assert_eq!(map.counts.classified(), 4);
    }

    #[test]
    fn ocean_cells_paint_ignored_color() {
        let f = Fixture::rgb(
            2,
            1,
            [&[OCEAN, T25], &[T25, T25], &[P300, P300], &[P300, OCEAN]],
        );
        let map = classify_map(&f.layers(), &Profiles::defaults(Mode::Koppen), UnresolvedPolicy::Fail)
            .unwrap();
        assert_eq!(map.colors, vec![OCEAN, OCEAN]);
        assert_eq!(map.counts.ignored, 2);
        assert!(map.counts.classes.is_empty());
    }

    #[test]
    fn holdridge_mode_uses_life_zone_colors() {
        let f = Fixture::rgb(1, 2, [&[T20, TM5], &[TM5, T20], &[P105; 2], &[P105; 2]]);
        let profiles = Profiles::defaults(Mode::Holdridge);
        let map = classify_map(&f.layers(), &profiles, UnresolvedPolicy::Fail).unwrap();
        // Both cells see the same pair of extremes once seasons are swapped.
        assert_eq!(map.colors[0], map.colors[1]);
        assert_eq!(map.counts.mode, Mode::Holdridge);
        assert_eq!(map.counts.classes.len(), 1);
        let (zone, _) = map.counts.classes.iter().next().unwrap();
        assert!(Mode::Holdridge.is_valid_code(zone));
    }

    #[test]
    fn unmapped_color_aborts_whole_batch() {
        let stray = Color::new(1, 2, 3);
        let f = Fixture::rgb(2, 1, [&[T25, T25], &[T25, T25], &[P300, P300], &[P300, stray]]);
        let err = classify_map(&f.layers(), &Profiles::defaults(Mode::Koppen), UnresolvedPolicy::Fail)
            .unwrap_err();
        assert_eq!(err, Error::UnmappedColor(stray));
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let small = ColorRaster::filled(2, 2, T25);
        let big = ColorRaster::filled(2, 3, T25);
        let layers = SeasonalLayers {
            temp_summer: &small,
            temp_winter: &small,
            precip_summer: &small,
            precip_winter: &big,
        };
        let err = classify_map(&layers, &Profiles::defaults(Mode::Koppen), UnresolvedPolicy::Fail)
            .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                layer: Layer::PrecipitationNorthernWinter,
                expected: (2, 2),
                actual: (2, 3),
            }
        );
    }

    #[test]
    fn bgr_layers_decode_like_rgb() {
        let ts = ColorRaster::new(1, 1, Channel::layout("BGR"), vec![65, 110, 245]).unwrap();
        let tw = ColorRaster::new(1, 1, Channel::layout("RGBA"), vec![245, 110, 65, 255]).unwrap();
        let p = ColorRaster::filled(1, 1, P300);
        let layers = SeasonalLayers { temp_summer: &ts, temp_winter: &tw, precip_summer: &p, precip_winter: &p };
        let map = classify_map(&layers, &Profiles::defaults(Mode::Koppen), UnresolvedPolicy::Fail).unwrap();
        let af = defaults::output_profile(Mode::Koppen).color_of("Af").unwrap();
        assert_eq!(map.colors, vec![af]);
        assert_eq!(map.to_rgb_bytes(), af.0.to_vec());
    }

    #[test]
    fn luma_layer_is_missing_channels() {
        let gray = ColorRaster::new(1, 1, Channel::layout("L"), vec![7]).unwrap();
        let p = ColorRaster::filled(1, 1, P300);
        let layers = SeasonalLayers { temp_summer: &p, temp_winter: &gray, precip_summer: &p, precip_winter: &p };
        let err = classify_map(&layers, &Profiles::defaults(Mode::Koppen), UnresolvedPolicy::Fail)
            .unwrap_err();
        assert!(matches!(err, Error::MissingChannel { layer: Layer::TemperatureNorthernWinter, .. }));
    }

    #[test]
    fn counts_serialize_to_json() {
        let f = Fixture::rgb(1, 1, [&[T25], &[T25], &[P300], &[P300]]);
        let map = classify_map(&f.layers(), &Profiles::defaults(Mode::Koppen), UnresolvedPolicy::Fail)
            .unwrap();
        let json = serde_json::to_value(&map.counts).unwrap();
        assert_eq!(json["mode"], "koppen");
        assert_eq!(json["classes"]["Af"], 1);
        assert_eq!(json["ignored"], 0);
    }
}
