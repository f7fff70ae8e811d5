use std::str::FromStr;

use crate::{
    foundation::error::PlexusError,
    scene::{catalog, clinical, overview, step::Scene},
    style::config::StyleConfig,
};

/// The closed set of shipped scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SceneKind {
    /// Roots through terminal branches, tier by tier.
    Overview,
    /// Branches given off before the terminal branches.
    NonTerminalBranches,
    /// Upper trunk injury.
    ErbsPalsy,
    /// Lower trunk injury.
    KlumpkesPalsy,
}

impl SceneKind {
    /// Every scene in presentation order.
    pub const ALL: [SceneKind; 4] = [
        SceneKind::Overview,
        SceneKind::NonTerminalBranches,
        SceneKind::ErbsPalsy,
        SceneKind::KlumpkesPalsy,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Overview => "Overview",
            SceneKind::NonTerminalBranches => "NonTerminalBranches",
            SceneKind::ErbsPalsy => "ErbsPalsy",
            SceneKind::KlumpkesPalsy => "KlumpkesPalsy",
        }
    }

    /// Command-line spelling.
    pub fn slug(self) -> &'static str {
        match self {
            SceneKind::Overview => "overview",
            SceneKind::NonTerminalBranches => "non-terminal-branches",
            SceneKind::ErbsPalsy => "erbs-palsy",
            SceneKind::KlumpkesPalsy => "klumpkes-palsy",
        }
    }

    /// Build the scene script against `style`.
    pub fn script(self, style: &StyleConfig) -> Scene {
        match self {
            SceneKind::Overview => overview::script(style),
            SceneKind::NonTerminalBranches => catalog::script(style),
            SceneKind::ErbsPalsy => clinical::erbs_palsy(style),
            SceneKind::KlumpkesPalsy => clinical::klumpkes_palsy(style),
        }
    }
}

impl std::fmt::Display for SceneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = PlexusError;

    /// Accepts the display name or the slug, ignoring case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|k| k.name().to_ascii_lowercase() == folded)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.slug()).collect();
                PlexusError::configuration(format!(
                    "unknown scene '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/library.rs"]
mod tests;
