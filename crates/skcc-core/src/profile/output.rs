//! Output color profile: classification code → map color.

use std::collections::{HashMap, HashSet};

use crate::classify::Mode;
use crate::color::Color;
use crate::error::{Error, Result};

use super::defaults::{OCEAN_COLOR, UNKNOWN_COLOR};
use super::{record, ProfileWarning};

/// Pseudo-keys that set [`OutputColorProfile::ignored_color`].
pub const IGNORED_KEYS: [&str; 2] = ["Ocean", "Ignored"];
/// Pseudo-key that sets [`OutputColorProfile::unknown_color`].
pub const UNKNOWN_KEY: &str = "Unknown";

/// Frozen code → color table for one taxonomy, plus the two reserved colors.
#[derive(Debug, Clone)]
pub struct OutputColorProfile {
    mode: Mode,
    colors: HashMap<String, Color>,
    ignored_color: Color,
    unknown_color: Color,
    warnings: Vec<ProfileWarning>,
}

impl OutputColorProfile {
    pub fn builder(mode: Mode) -> OutputProfileBuilder {
        OutputProfileBuilder {
            mode,
            colors: HashMap::new(),
            ignored_color: OCEAN_COLOR,
            unknown_color: UNKNOWN_COLOR,
            reserved_seen: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn color_of(&self, code: &str) -> Option<Color> {
        self.colors.get(code).copied()
    }

    pub fn ignored_color(&self) -> Color {
        self.ignored_color
    }

    pub fn unknown_color(&self) -> Color {
        self.unknown_color
    }

    /// Configured taxonomy codes and their colors; reserved keys are not included.
    pub fn codes(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.colors.iter().map(|(k, &c)| (k.as_str(), c))
    }

    /// Taxonomy codes with no configured color.
    pub fn missing_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.mode.codes().filter(|c| !self.colors.contains_key(*c))
    }

    pub fn warnings(&self) -> &[ProfileWarning] {
        &self.warnings
    }
}

#[derive(Debug)]
pub struct OutputProfileBuilder {
    mode: Mode,
    colors: HashMap<String, Color>,
    ignored_color: Color,
    unknown_color: Color,
    reserved_seen: HashSet<&'static str>,
    warnings: Vec<ProfileWarning>,
}

impl OutputProfileBuilder {
    /// Add one entry. Reserved keys set the ignored/unknown colors; any other
    /// key must belong to the builder's taxonomy.
    pub fn insert(&mut self, key: &str, color: Color) -> Result<&mut Self> {
        if let Some(&reserved) = IGNORED_KEYS.iter().find(|&&k| k == key) {
            self.note_reserved(reserved);
            self.ignored_color = color;
        } else if key == UNKNOWN_KEY {
            self.note_reserved(UNKNOWN_KEY);
            self.unknown_color = color;
        } else if self.mode.is_valid_code(key) {
            self.insert_code(key, color);
        } else {
            return Err(Error::InvalidClassKey { mode: self.mode, key: key.to_string() });
        }
        Ok(self)
    }

    /// Add a code already known to belong to the taxonomy.
    pub(crate) fn insert_code(&mut self, code: &str, color: Color) -> &mut Self {
        if self.colors.insert(code.to_string(), color).is_some() {
            record(&mut self.warnings, ProfileWarning::DuplicateKey(code.to_string()));
        }
        self
    }

    fn note_reserved(&mut self, key: &'static str) {
        if !self.reserved_seen.insert(key) {
            record(&mut self.warnings, ProfileWarning::DuplicateKey(key.to_string()));
        }
    }

    pub fn build(&mut self) -> OutputColorProfile {
        OutputColorProfile {
            mode: self.mode,
            colors: std::mem::take(&mut self.colors),
            ignored_color: self.ignored_color,
            unknown_color: self.unknown_color,
            warnings: std::mem::take(&mut self.warnings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_configure_sentinel_colors() {
        let mut b = OutputColorProfile::builder(Mode::Koppen);
        b.insert("Ocean", Color::new(1, 1, 1))
            .unwrap()
            .insert("Unknown", Color::new(2, 2, 2))
            .unwrap()
            .insert("Af", Color::new(3, 3, 3))
            .unwrap();
        let p = b.build();
        assert_eq!(p.ignored_color(), Color::new(1, 1, 1));
        assert_eq!(p.unknown_color(), Color::new(2, 2, 2));
        let codes: Vec<_> = p.codes().collect();
        assert_eq!(codes, vec![("Af", Color::new(3, 3, 3))]);
        assert_eq!(p.color_of("Ocean"), None);
    }

    #[test]
    fn ignored_key_is_an_alias_for_ocean() {
        let mut b = OutputColorProfile::builder(Mode::Holdridge);
        b.insert("Ignored", Color::new(9, 9, 9)).unwrap();
        assert_eq!(b.build().ignored_color(), Color::new(9, 9, 9));
    }

    #[test]
    fn defaults_apply_when_reserved_keys_absent() {
        let p = OutputColorProfile::builder(Mode::Koppen).build();
        assert_eq!(p.ignored_color(), OCEAN_COLOR);
        assert_eq!(p.unknown_color(), UNKNOWN_COLOR);
        assert_eq!(p.missing_codes().count(), Mode::Koppen.codes().count());
    }

    #[test]
    fn foreign_codes_are_rejected() {
        let mut b = OutputColorProfile::builder(Mode::Holdridge);
        let err = b.insert("Cfa", Color::BLACK).unwrap_err();
        assert_eq!(err, Error::InvalidClassKey { mode: Mode::Holdridge, key: "Cfa".into() });
    }

    #[test]
    fn duplicate_keys_warn_and_later_wins() {
        let mut b = OutputColorProfile::builder(Mode::Koppen);
        b.insert("ET", Color::new(1, 0, 0)).unwrap();
        b.insert("ET", Color::new(2, 0, 0)).unwrap();
        b.insert("Ocean", Color::new(3, 0, 0)).unwrap();
        b.insert("Ocean", Color::new(4, 0, 0)).unwrap();
        let p = b.build();
        assert_eq!(p.color_of("ET"), Some(Color::new(2, 0, 0)));
        assert_eq!(p.ignored_color(), Color::new(4, 0, 0));
        assert_eq!(
            p.warnings(),
            &[
                ProfileWarning::DuplicateKey("ET".into()),
                ProfileWarning::DuplicateKey("Ocean".into()),
            ]
        );
    }
}
