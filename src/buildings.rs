//! The fixed building catalog: three kinds, each with a happiness effect and
//! the display attributes the renderer needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    House,
    Factory,
    Park,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 3] = [
        BuildingKind::House,
        BuildingKind::Factory,
        BuildingKind::Park,
    ];

    /// Happiness contributed to every cell of the surrounding 3×3
    /// neighborhood. Effects from multiple buildings are purely additive.
    pub fn happiness_effect(self) -> i32 {
        match self {
            BuildingKind::House => 1,
            BuildingKind::Factory => -2,
            BuildingKind::Park => 3,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            BuildingKind::House => "\u{1F3E0}",
            BuildingKind::Factory => "\u{1F3ED}",
            BuildingKind::Park => "\u{1F333}",
        }
    }

    /// Fill color behind the glyph.
    pub fn color(self) -> &'static str {
        match self {
            BuildingKind::House => "blue",
            BuildingKind::Factory => "gray",
            BuildingKind::Park => "green",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildingKind::House => "house",
            BuildingKind::Factory => "factory",
            BuildingKind::Park => "park",
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown building kind '{0}'")]
pub struct UnknownBuildingKind(String);

impl FromStr for BuildingKind {
    type Err = UnknownBuildingKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(BuildingKind::House),
            "factory" => Ok(BuildingKind::Factory),
            "park" => Ok(BuildingKind::Park),
            other => Err(UnknownBuildingKind(other.to_string())),
        }
    }
}
