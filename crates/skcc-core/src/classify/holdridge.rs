//! Holdridge life-zone lookup.
//!
//! Biotemperature is estimated from the two seasonal extremes by assuming a
//! sinusoidal annual cycle between them, sampled at twelve monthly phase
//! points, with every monthly value bounded to [0, 30] °C. Annual
//! precipitation is six months of each season. Biotemperature selects a
//! latitudinal band; precipitation selects the zone within it.

use crate::fuse::CellSample;
use crate::profile::defaults::HOLDRIDGE_COLORS;

/// Blend weight towards the summer extreme for phase `k = 0..=6`:
/// `(sin(k·π/6 − π/2) + 1) / 2`. Months 7..=11 mirror months 5..=1.
const BLEND: [f64; 7] = [
    0.0,
    0.066_987_298_107_780_68,
    0.25,
    0.5,
    0.75,
    0.933_012_701_892_219_3,
    1.0,
];

/// Ascending annual precipitation thresholds shared by every band.
const PRECIP_THRESHOLDS: [f64; 7] = [125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0];

const MONTHS_PER_SEASON: f64 = 6.0;

/// Named life zone. Discriminants index [`HOLDRIDGE_COLORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifeZone {
    Ice,
    PolarDesert,
    SubpolarDryTundra,
    SubpolarMoistTundra,
    SubpolarWetTundra,
    SubpolarRainTundra,
    BorealDesert,
    BorealDryScrub,
    BorealMoistForest,
    BorealWetForest,
    BorealRainForest,
    CoolTemperateDesert,
    CoolTemperateDesertScrub,
    CoolTemperateSteppe,
    CoolTemperateMoistForest,
    CoolTemperateWetForest,
    CoolTemperateRainForest,
    WarmTemperateDesert,
    WarmTemperateDesertScrub,
    WarmTemperateThornScrub,
    WarmTemperateDryForest,
    WarmTemperateMoistForest,
    WarmTemperateWetForest,
    WarmTemperateRainForest,
    SubtropicalDesert,
    SubtropicalDesertScrub,
    SubtropicalThornWoodland,
    SubtropicalDryForest,
    SubtropicalMoistForest,
    SubtropicalWetForest,
    SubtropicalRainForest,
    TropicalDesert,
    TropicalDesertScrub,
    TropicalThornWoodland,
    TropicalVeryDryForest,
    TropicalDryForest,
    TropicalMoistForest,
    TropicalWetForest,
    TropicalRainForest,
}

impl LifeZone {
    /// Display name, which is also the output profile key.
    pub fn name(self) -> &'static str {
        HOLDRIDGE_COLORS[self as usize].0
    }
}

use LifeZone::*;

/// Biotemperature bands, coldest first: exclusive upper bound and the zones
/// selected by successive precipitation thresholds.
const BANDS: [(f64, &[LifeZone]); 6] = [
    (3.0, &[SubpolarDryTundra, SubpolarMoistTundra, SubpolarWetTundra, SubpolarRainTundra]),
    (6.0, &[BorealDesert, BorealDryScrub, BorealMoistForest, BorealWetForest, BorealRainForest]),
    (
        12.0,
        &[
            CoolTemperateDesert,
            CoolTemperateDesertScrub,
            CoolTemperateSteppe,
            CoolTemperateMoistForest,
            CoolTemperateWetForest,
            CoolTemperateRainForest,
        ],
    ),
    (
        17.0,
        &[
            WarmTemperateDesert,
            WarmTemperateDesertScrub,
            WarmTemperateThornScrub,
            WarmTemperateDryForest,
            WarmTemperateMoistForest,
            WarmTemperateWetForest,
            WarmTemperateRainForest,
        ],
    ),
    (
        24.0,
        &[
            SubtropicalDesert,
            SubtropicalDesertScrub,
            SubtropicalThornWoodland,
            SubtropicalDryForest,
            SubtropicalMoistForest,
            SubtropicalWetForest,
            SubtropicalRainForest,
        ],
    ),
    (
        f64::INFINITY,
        &[
            TropicalDesert,
            TropicalDesertScrub,
            TropicalThornWoodland,
            TropicalVeryDryForest,
            TropicalDryForest,
            TropicalMoistForest,
            TropicalWetForest,
            TropicalRainForest,
        ],
    ),
];

const POLAR_DESERT_LIMIT: f64 = 1.5;

#[inline]
pub fn bound_temperature(t: f64) -> f64 {
    t.clamp(0.0, 30.0)
}

/// Mean of twelve bounded monthly temperatures interpolated between the extremes.
pub fn biotemperature(t_summer: f64, t_winter: f64) -> f64 {
    let span = t_summer - t_winter;
    let total: f64 = BLEND
        .iter()
        .enumerate()
        .map(|(k, w)| {
            let t = bound_temperature(t_winter + w * span);
            // Phases 0 and 6 occur once per year, the others twice.
            if k == 0 || k == BLEND.len() - 1 {
                t
            } else {
                2.0 * t
            }
        })
        .sum();
    total / 12.0
}

pub fn annual_precipitation(precip_summer: f64, precip_winter: f64) -> f64 {
    (precip_summer + precip_winter) * MONTHS_PER_SEASON
}

/// Zone for a biotemperature and annual precipitation estimate.
pub fn life_zone(biotemp: f64, annual_precip: f64) -> LifeZone {
    if biotemp <= 0.0 {
        return Ice;
    }
    if biotemp < POLAR_DESERT_LIMIT {
        return PolarDesert;
    }
    let zones = BANDS
        .iter()
        .find(|(upper, _)| biotemp < *upper)
        .map(|&(_, zones)| zones)
        .unwrap_or(BANDS[BANDS.len() - 1].1);
    let wetter = PRECIP_THRESHOLDS[..zones.len() - 1]
        .iter()
        .take_while(|&&t| annual_precip >= t)
        .count();
    zones[wetter]
}

/// Classify a non-ignored cell.
pub fn classify(cell: &CellSample) -> LifeZone {
    life_zone(
        biotemperature(cell.temp_summer, cell.temp_winter),
        annual_precipitation(cell.precip_summer, cell.precip_winter),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn blend_weights_follow_sine_curve() {
        for (k, &w) in BLEND.iter().enumerate() {
            let phase = k as f64 * std::f64::consts::PI / 6.0 - std::f64::consts::FRAC_PI_2;
            assert_abs_diff_eq!(w, (phase.sin() + 1.0) / 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zone_order_matches_color_table() {
        assert_eq!(TropicalRainForest as usize + 1, HOLDRIDGE_COLORS.len());
        assert_eq!(Ice.name(), "Ice");
        assert_eq!(PolarDesert.name(), "Polar desert");
        assert_eq!(CoolTemperateSteppe.name(), "Cool temperate steppe");
        assert_eq!(WarmTemperateThornScrub.name(), "Warm temperate thorn scrub");
        assert_eq!(TropicalVeryDryForest.name(), "Tropical very dry forest");
        assert_eq!(TropicalRainForest.name(), "Tropical rain forest");
    }

    /// Uniform 30 °C year, 2400 mm: tropical band, [2000, 4000) slot.
    #[test]
    fn tropical_moist_forest_scenario() {
        let cell = CellSample::new(30.0, 30.0, 200.0, 200.0);
        assert_abs_diff_eq!(biotemperature(30.0, 30.0), 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(annual_precipitation(200.0, 200.0), 2400.0);
        assert_eq!(classify(&cell), TropicalMoistForest);
    }

    #[test]
    fn equal_extremes_give_bounded_value() {
        assert_abs_diff_eq!(biotemperature(12.0, 12.0), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(biotemperature(-20.0, -20.0), 0.0);
        assert_abs_diff_eq!(biotemperature(45.0, 45.0), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn biotemperature_is_symmetric_in_extremes() {
        assert_abs_diff_eq!(biotemperature(25.0, -10.0), biotemperature(-10.0, 25.0), epsilon = 1e-12);
    }

    #[test]
    fn biotemperature_discounts_frost() {
        // Mean of the raw cycle is 5 °C, but freezing months count as 0.
        let bt = biotemperature(20.0, -10.0);
        assert!(bt > 5.0, "bounded cycle should exceed the raw mean, got {bt:.3}");
        assert!(bt < 20.0);
    }

    /// Non-decreasing in each extreme and always inside [0, 30].
    #[test]
    fn biotemperature_monotonic_and_bounded() {
        let temps: Vec<f64> = (-50..=50).map(|t| t as f64).collect();
        for &fixed in &[-30.0, -5.0, 0.0, 12.0, 28.0, 40.0] {
            let mut prev_s = f64::NEG_INFINITY;
            let mut prev_w = f64::NEG_INFINITY;
            for &t in &temps {
                let s = biotemperature(t, fixed);
                let w = biotemperature(fixed, t);
                assert!(s >= prev_s - 1e-12, "not monotonic in summer at {t}");
                assert!(w >= prev_w - 1e-12, "not monotonic in winter at {t}");
                assert!((0.0..=30.0).contains(&s) && (0.0..=30.0).contains(&w));
                prev_s = s;
                prev_w = w;
            }
        }
    }

    #[test]
    fn fixed_polar_bands() {
        assert_eq!(life_zone(0.0, 5000.0), Ice);
        assert_eq!(life_zone(1.0, 0.0), PolarDesert);
        assert_eq!(life_zone(1.5, 0.0), SubpolarDryTundra);
    }

    #[test]
    fn threshold_values_fall_into_wetter_zone() {
        assert_eq!(life_zone(2.0, 124.9), SubpolarDryTundra);
        assert_eq!(life_zone(2.0, 125.0), SubpolarMoistTundra);
        assert_eq!(life_zone(2.0, 10_000.0), SubpolarRainTundra);
        assert_eq!(life_zone(5.0, 1000.0), BorealRainForest);
        assert_eq!(life_zone(11.9, 499.0), CoolTemperateSteppe);
        assert_eq!(life_zone(12.0, 499.0), WarmTemperateThornScrub);
        assert_eq!(life_zone(20.0, 4000.0), SubtropicalRainForest);
        assert_eq!(life_zone(24.0, 8000.0), TropicalRainForest);
        assert_eq!(life_zone(26.0, 600.0), TropicalVeryDryForest);
        assert_eq!(life_zone(26.0, 0.0), TropicalDesert);
    }

    #[test]
    fn every_zone_is_reachable() {
        let biotemps = [0.0, 1.0, 2.0, 4.0, 8.0, 14.0, 20.0, 27.0];
        let precips = [0.0, 200.0, 400.0, 800.0, 1500.0, 3000.0, 6000.0, 9000.0];
        let mut seen = std::collections::HashSet::new();
        for &b in &biotemps {
            for &p in &precips {
                seen.insert(life_zone(b, p));
            }
        }
        assert_eq!(seen.len(), HOLDRIDGE_COLORS.len());
    }
}
