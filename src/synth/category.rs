//! Ambience category tags.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use super::recipe::Recipe;
use super::{birds, forest, night, ocean, snow, stream};
use crate::error::AmbienceError;

/// Which generation algorithm runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmbienceCategory {
    Forest,
    Ocean,
    Stream,
    Snow,
    Birds,
    Night,
}

impl AmbienceCategory {
    /// All categories in catalog order
    pub const ALL: [AmbienceCategory; 6] = [
        AmbienceCategory::Forest,
        AmbienceCategory::Ocean,
        AmbienceCategory::Stream,
        AmbienceCategory::Snow,
        AmbienceCategory::Birds,
        AmbienceCategory::Night,
    ];

    /// Lowercase tag used in scene data and on the command line
    pub fn tag(self) -> &'static str {
        match self {
            AmbienceCategory::Forest => "forest",
            AmbienceCategory::Ocean => "ocean",
            AmbienceCategory::Stream => "stream",
            AmbienceCategory::Snow => "snow",
            AmbienceCategory::Birds => "birds",
            AmbienceCategory::Night => "night",
        }
    }

    /// Parse a tag, falling back to forest for anything unrecognized
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            warn!("Unknown ambience '{}', using forest", tag);
            AmbienceCategory::Forest
        })
    }

    /// Layer table and master gain for this category
    pub fn recipe(self) -> Recipe {
        match self {
            AmbienceCategory::Forest => forest::recipe(),
            AmbienceCategory::Ocean => ocean::recipe(),
            AmbienceCategory::Stream => stream::recipe(),
            AmbienceCategory::Snow => snow::recipe(),
            AmbienceCategory::Birds => birds::recipe(),
            AmbienceCategory::Night => night::recipe(),
        }
    }
}

impl fmt::Display for AmbienceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AmbienceCategory {
    type Err = AmbienceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        AmbienceCategory::ALL
            .into_iter()
            .find(|c| c.tag() == normalized)
            .ok_or_else(|| AmbienceError::UnknownCategory(s.to_string()))
    }
}
