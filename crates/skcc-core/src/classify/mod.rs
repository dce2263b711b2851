//! Classification modes and their results.
//!
//! [`Mode`] is chosen once per run. It fixes both the decision procedure
//! applied to each [`CellSample`] and the set of codes an output profile may
//! name.

pub mod holdridge;
pub mod koppen;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fuse::CellSample;
use crate::profile::defaults::{HOLDRIDGE_COLORS, KOPPEN_COLORS};

pub use holdridge::LifeZone;
pub use koppen::{ClimateGroup, KoppenCode};

/// Climate taxonomy used for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Koppen,
    Holdridge,
}

impl Mode {
    /// Every code of this taxonomy, in built-in table order.
    pub fn codes(self) -> impl Iterator<Item = &'static str> {
        let table: &'static [(&'static str, [u8; 3])] = match self {
            Mode::Koppen => KOPPEN_COLORS,
            Mode::Holdridge => HOLDRIDGE_COLORS,
        };
        table.iter().map(|&(code, _)| code)
    }

    pub fn is_valid_code(self, code: &str) -> bool {
        self.codes().any(|c| c == code)
    }

    /// Classify one fused cell. Ignored cells short-circuit to [`Classification::Ignored`].
    pub fn classify(self, cell: &CellSample) -> Classification {
        if cell.ignored {
            return Classification::Ignored;
        }
        match self {
            Mode::Koppen => Classification::Climate(koppen::classify(cell)),
            Mode::Holdridge => Classification::LifeZone(holdridge::classify(cell)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Koppen => f.write_str("Köppen-Geiger"),
            Mode::Holdridge => f.write_str("Holdridge"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "koppen" | "köppen" | "koppen-geiger" | "k" => Ok(Mode::Koppen),
            "holdridge" | "h" => Ok(Mode::Holdridge),
            other => Err(format!("unknown classification mode {other:?}")),
        }
    }
}

/// Outcome of classifying one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Ignored,
    Climate(KoppenCode),
    LifeZone(LifeZone),
}

impl Classification {
    /// The taxonomy code, or `None` for an ignored cell.
    pub fn code(&self) -> Option<&str> {
        match self {
            Classification::Ignored => None,
            Classification::Climate(code) => Some(code.as_str()),
            Classification::LifeZone(zone) => Some(zone.name()),
        }
    }
}
