//! Classification result → output color.

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::profile::OutputColorProfile;

/// Handling of a code that the output profile does not configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Abort the run with [`Error::UnknownClassification`].
    #[default]
    Fail,
    /// Paint the profile's unknown color.
    PaintUnknown,
}

#[derive(Debug, Clone, Copy)]
pub struct OutputMapper<'a> {
    profile: &'a OutputColorProfile,
    policy: UnresolvedPolicy,
}

impl<'a> OutputMapper<'a> {
    pub fn new(profile: &'a OutputColorProfile, policy: UnresolvedPolicy) -> Self {
        Self { profile, policy }
    }

    pub fn map(&self, result: &Classification) -> Result<Color> {
        let Some(code) = result.code() else {
            return Ok(self.profile.ignored_color());
        };
        match (self.profile.color_of(code), self.policy) {
            (Some(color), _) => Ok(color),
            (None, UnresolvedPolicy::PaintUnknown) => Ok(self.profile.unknown_color()),
            (None, UnresolvedPolicy::Fail) => Err(Error::UnknownClassification(code.to_string())),
        }
    }
}
