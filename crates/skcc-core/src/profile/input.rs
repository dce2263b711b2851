//! Input color profile: sample color → temperature or precipitation value.

use std::collections::{HashMap, HashSet};

use crate::color::Color;
use crate::error::{Error, Result};

use super::{record, ProfileWarning};

/// What to do with a color that is neither mapped nor explicitly ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DefaultPolicy {
    /// Unmapped colors are a fatal [`Error::UnmappedColor`].
    #[default]
    None,
    /// Unmapped colors mark the cell as ignored.
    IgnoreUnmapped,
    /// Unmapped colors decode to this value.
    Value(f64),
}

/// Frozen color → value table with an ignore set and a default policy.
///
/// A color is never both mapped and ignored: the builder keeps the later of
/// the two definitions.
#[derive(Debug, Clone)]
pub struct InputColorProfile {
    values: HashMap<Color, f64>,
    ignored: HashSet<Color>,
    default: DefaultPolicy,
    warnings: Vec<ProfileWarning>,
}

impl InputColorProfile {
    pub fn builder() -> InputProfileBuilder {
        InputProfileBuilder::default()
    }

    /// Build a profile from a value table and an ignore list, with no default.
    pub fn from_table(table: &[([u8; 3], f64)], ignored: &[Color]) -> Self {
        let mut b = Self::builder();
        for &(rgb, v) in table {
            b.insert_value(Color(rgb), v);
        }
        for &c in ignored {
            b.insert_ignored(c);
        }
        b.build()
    }

    /// True if the color is in the ignore set, or is unmapped while the
    /// default policy is [`DefaultPolicy::IgnoreUnmapped`].
    pub fn is_ignored(&self, color: Color) -> bool {
        self.ignored.contains(&color)
            || (self.default == DefaultPolicy::IgnoreUnmapped && !self.values.contains_key(&color))
    }

    /// Decode a sample color.
    ///
    /// Returns `Ok(None)` for an ignored color, the mapped value if present,
    /// otherwise the default value. Fails with [`Error::UnmappedColor`] when
    /// none of these apply.
    pub fn value_of(&self, color: Color) -> Result<Option<f64>> {
        if self.is_ignored(color) {
            return Ok(None);
        }
        match (self.values.get(&color), self.default) {
            (Some(&v), _) => Ok(Some(v)),
            (None, DefaultPolicy::Value(v)) => Ok(Some(v)),
            (None, _) => Err(Error::UnmappedColor(color)),
        }
    }

    pub fn default_policy(&self) -> DefaultPolicy {
        self.default
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn ignored_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.ignored.iter().copied()
    }

    /// Every color the profile names, mapped or ignored.
    pub fn known_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.values.keys().copied().chain(self.ignored_colors())
    }

    /// Duplicate-entry diagnostics collected while the profile was built.
    pub fn warnings(&self) -> &[ProfileWarning] {
        &self.warnings
    }
}

#[derive(Debug, Default)]
pub struct InputProfileBuilder {
    values: HashMap<Color, f64>,
    ignored: HashSet<Color>,
    default: Option<DefaultPolicy>,
    warnings: Vec<ProfileWarning>,
}

impl InputProfileBuilder {
    fn is_defined(&self, color: Color) -> bool {
        self.values.contains_key(&color) || self.ignored.contains(&color)
    }

    pub fn insert_value(&mut self, color: Color, value: f64) -> &mut Self {
        if self.is_defined(color) {
            record(&mut self.warnings, ProfileWarning::DuplicateColor(color));
        }
        self.ignored.remove(&color);
        self.values.insert(color, value);
        self
    }

    pub fn insert_ignored(&mut self, color: Color) -> &mut Self {
        if self.is_defined(color) {
            record(&mut self.warnings, ProfileWarning::DuplicateColor(color));
        }
        self.values.remove(&color);
        self.ignored.insert(color);
        self
    }

    pub fn set_default(&mut self, policy: DefaultPolicy) -> &mut Self {
        if self.default.is_some() {
            record(&mut self.warnings, ProfileWarning::DuplicateDefault);
        }
        self.default = Some(policy);
        self
    }

    pub fn build(&mut self) -> InputColorProfile {
        InputColorProfile {
            values: std::mem::take(&mut self.values),
            ignored: std::mem::take(&mut self.ignored),
            default: self.default.take().unwrap_or_default(),
            warnings: std::mem::take(&mut self.warnings),
        }
    }
}
