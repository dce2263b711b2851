//! Color profiles: how sample colors decode to values, and how
//! classification codes encode to output colors.
//!
//! Profiles are built once (from the built-in tables in [`defaults`] or from
//! a text file via [`parse`]) and are read-only afterwards. Builders accept
//! duplicate keys, let the later entry win, and record a [`ProfileWarning`].

pub mod defaults;
pub mod input;
pub mod output;
pub mod parse;

use std::fmt;

use crate::color::Color;

pub use input::{DefaultPolicy, InputColorProfile, InputProfileBuilder};
pub use output::{OutputColorProfile, OutputProfileBuilder};

/// Non-fatal diagnostic recorded while building a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileWarning {
    DuplicateColor(Color),
    DuplicateDefault,
    DuplicateKey(String),
}

impl fmt::Display for ProfileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileWarning::DuplicateColor(c) => write!(f, "duplicate color in input profile: {c}"),
            ProfileWarning::DuplicateDefault => f.write_str("duplicate default value in input profile"),
            ProfileWarning::DuplicateKey(k) => write!(f, "duplicate entries for key {k:?} in output profile"),
        }
    }
}

/// Record a warning on the builder. Callers that know the profile's source
/// decide how to report it.
fn record(warnings: &mut Vec<ProfileWarning>, warning: ProfileWarning) {
    warnings.push(warning);
}
