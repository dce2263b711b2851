//! Köppen-Geiger decision tree.
//!
//! Works from two seasonal extremes only: summer and winter mean temperature
//! (°C) and summer and winter precipitation. Annual precipitation is
//! estimated as six months of each season.
//!
//! The aridity thresholds follow Kottek et al. (2006), "World Map of the
//! Köppen-Geiger climate classification updated".

use std::fmt;

use crate::fuse::CellSample;

/// Months per season used to extrapolate annual precipitation.
const MONTHS_PER_SEASON: f64 = 6.0;

/// First letter of a Köppen-Geiger code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClimateGroup {
    /// Tropical.
    A,
    /// Arid.
    B,
    /// Temperate.
    C,
    /// Continental.
    D,
    /// Polar.
    E,
}

impl ClimateGroup {
    fn letter(self) -> u8 {
        match self {
            ClimateGroup::A => b'A',
            ClimateGroup::B => b'B',
            ClimateGroup::C => b'C',
            ClimateGroup::D => b'D',
            ClimateGroup::E => b'E',
        }
    }
}

/// A two- or three-letter code such as `Af`, `ET` or `Cfb`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KoppenCode {
    letters: [u8; 3],
    len: u8,
}

impl KoppenCode {
    fn new(group: ClimateGroup, pattern: char, subtype: Option<char>) -> Self {
        let mut letters = [group.letter(), pattern as u8, 0];
        let len = match subtype {
            Some(s) => {
                letters[2] = s as u8;
                3
            }
            None => 2,
        };
        Self { letters, len }
    }

    pub fn group(&self) -> ClimateGroup {
        match self.letters[0] {
            b'A' => ClimateGroup::A,
            b'B' => ClimateGroup::B,
            b'C' => ClimateGroup::C,
            b'D' => ClimateGroup::D,
            _ => ClimateGroup::E,
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.letters[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for KoppenCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KoppenCode({})", self.as_str())
    }
}

impl fmt::Display for KoppenCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Decision steps ────────────────────────────────────────────────────────────

/// Temperature group assuming the cell is not arid.
pub fn temperature_group(t_summer: f64, t_winter: f64) -> ClimateGroup {
    let min_t = t_summer.min(t_winter);
    let max_t = t_summer.max(t_winter);
    if min_t > 18.0 {
        ClimateGroup::A
    } else if max_t < 10.0 {
        ClimateGroup::E
    } else if min_t >= 0.0 {
        ClimateGroup::C
    } else {
        ClimateGroup::D
    }
}

/// Evapotranspiration threshold `R` and estimated annual precipitation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AridityEstimate {
    pub threshold: f64,
    pub annual_precip: f64,
}

impl AridityEstimate {
    pub fn new(cell: &CellSample) -> Self {
        let t_ann = (cell.temp_summer + cell.temp_winter) / 2.0;
        let summer_est = cell.precip_summer * MONTHS_PER_SEASON;
        let winter_est = cell.precip_winter * MONTHS_PER_SEASON;
        let annual_precip = summer_est + winter_est;
        let summer_percent = summer_est / annual_precip * 100.0;
        let threshold = if summer_percent > 66.667 {
            10.0 * (2.0 * t_ann + 28.0)
        } else if summer_percent < 33.333 {
            10.0 * (2.0 * t_ann)
        } else {
            10.0 * (2.0 * t_ann + 14.0)
        };
        Self { threshold, annual_precip }
    }

    /// `W` (desert) below half the threshold, `S` (steppe) below the threshold.
    pub fn arid_pattern(&self) -> Option<char> {
        if self.annual_precip < self.threshold / 2.0 {
            Some('W')
        } else if self.annual_precip < self.threshold {
            Some('S')
        } else {
            None
        }
    }
}

/// Second letter for a non-arid group.
///
/// Never called with [`ClimateGroup::B`]: arid cells take `W` or `S` from
/// [`AridityEstimate::arid_pattern`] instead.
pub(crate) fn precipitation_pattern(
    group: ClimateGroup,
    cell: &CellSample,
    annual_precip: f64,
) -> char {
    let (ps, pw) = (cell.precip_summer, cell.precip_winter);
    match group {
        ClimateGroup::A => {
            if ps > 60.0 && pw > 60.0 {
                'f'
            } else {
                let w_thresh = 100.0 - annual_precip / 25.0;
                let dry = ps.min(pw);
                if dry >= w_thresh {
                    'm'
                } else if pw < 60.0 {
                    'w'
                } else {
                    's'
                }
            }
        }
        ClimateGroup::C | ClimateGroup::D => {
            if pw < ps * 0.1 {
                'w'
            } else if ps < pw * 0.33 && ps < 40.0 {
                's'
            } else {
                'f'
            }
        }
        ClimateGroup::E => {
            if cell.temp_summer.max(cell.temp_winter) < 0.0 {
                'F'
            } else {
                'T'
            }
        }
        ClimateGroup::B => unreachable!("arid pattern comes from the aridity test"),
    }
}

/// Third letter; `A` and `E` climates have none.
pub fn seasonal_subtype(group: ClimateGroup, t_summer: f64, t_winter: f64) -> Option<char> {
    match group {
        ClimateGroup::B => Some(if (t_summer + t_winter) / 2.0 >= 18.0 { 'h' } else { 'k' }),
        ClimateGroup::C => Some(if t_summer >= 22.0 {
            'a'
        } else if t_winter < 10.0 && t_summer < 13.0 {
            'c'
        } else {
            'b'
        }),
        ClimateGroup::D => Some(if t_summer >= 22.0 {
            'a'
        } else if t_winter < -38.0 {
            'd'
        } else if t_winter < -10.0 && t_summer <= 14.0 {
            'c'
        } else {
            'b'
        }),
        ClimateGroup::A | ClimateGroup::E => None,
    }
}

/// Run the full decision tree on a non-ignored cell.
pub fn classify(cell: &CellSample) -> KoppenCode {
    let mut group = temperature_group(cell.temp_summer, cell.temp_winter);
    let mut pattern = None;
    let mut annual_precip = 0.0;

    // Polar climates are exempt from the aridity test.
    if group != ClimateGroup::E {
        let est = AridityEstimate::new(cell);
        annual_precip = est.annual_precip;
        if let Some(p) = est.arid_pattern() {
            group = ClimateGroup::B;
            pattern = Some(p);
        }
    }

    let pattern = pattern.unwrap_or_else(|| precipitation_pattern(group, cell, annual_precip));
    let subtype = seasonal_subtype(group, cell.temp_summer, cell.temp_winter);
    KoppenCode::new(group, pattern, subtype)
}
