//! Height-banded biome classification

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Biome types
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    /// Low-lying dry ground
    Desert,
    /// Mid-altitude growth
    #[default]
    Vegetation,
    /// High, exposed rock
    Rocky,
}

impl Biome {
    pub const ALL: [Biome; 3] = [Biome::Desert, Biome::Vegetation, Biome::Rocky];

    /// Classify a normalized height (0 = lowest, 1 = highest).
    ///
    /// Pure function of the height value, never of chunk identity, so the
    /// same world point classifies identically from any chunk.
    pub fn classify(normalized_height: f32, bands: &BiomeBands) -> Biome {
        if normalized_height < bands.desert_below {
            Biome::Desert
        } else if normalized_height > bands.rocky_above {
            Biome::Rocky
        } else {
            Biome::Vegetation
        }
    }

    /// Base surface color (linear RGB, 0-1)
    pub fn base_color(&self) -> Vec3 {
        match self {
            Biome::Desert => Vec3::new(0.93, 0.79, 0.53),
            Biome::Vegetation => Vec3::new(0.30, 0.62, 0.25),
            Biome::Rocky => Vec3::new(0.47, 0.45, 0.43),
        }
    }

    /// Short lowercase name for logs and tool output
    pub fn name(&self) -> &'static str {
        match self {
            Biome::Desert => "desert",
            Biome::Vegetation => "vegetation",
            Biome::Rocky => "rocky",
        }
    }
}

/// Normalized height thresholds separating the biome bands
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeBands {
    /// Below this normalized height: desert
    pub desert_below: f32,
    /// Above this normalized height: rocky
    pub rocky_above: f32,
}

impl Default for BiomeBands {
    fn default() -> Self {
        Self {
            desert_below: 0.42,
            rocky_above: 0.58,
        }
    }
}
