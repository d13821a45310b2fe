//! Generation configuration: terrain sampling, meshing and resource placement.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::mesh::builder::MeshParams;
use crate::terrain::coords::DEFAULT_CHUNK_SIZE;
use crate::terrain::generator::TerrainParams;

/// Upper bound on candidates per chunk for one resource type
pub const MAX_DENSITY: f32 = 4096.0;

/// Configuration for the per-chunk generation pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Global seed for terrain noise and resource placement.
    pub seed: u32,
    /// Chunk side length in world units.
    pub chunk_size: f32,
    /// Grid cells per chunk side; meshes get `(resolution + 1)²` vertices.
    pub resolution: u32,
    /// Terrain noise parameters.
    pub terrain: TerrainParams,
    /// Seam blending parameters.
    pub mesh: MeshParams,
    /// Resource densities and ranges.
    pub placement: PlacementConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            chunk_size: DEFAULT_CHUNK_SIZE,
            resolution: 16,
            terrain: TerrainParams::default(),
            mesh: MeshParams::default(),
            placement: PlacementConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Create from a seed with default parameters otherwise.
    pub fn with_seed(seed: u32) -> Self {
        Self { seed, ..Default::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size.is_nan() || self.chunk_size <= 0.0 {
            return Err(Error::Config(format!("chunk_size must be positive, got {}", self.chunk_size)));
        }
        if self.resolution == 0 {
            return Err(Error::Config("resolution must be at least 1".into()));
        }
        if self.terrain.scale.is_nan() || self.terrain.scale <= 0.0 {
            return Err(Error::Config(format!("terrain.scale must be positive, got {}", self.terrain.scale)));
        }
        if self.terrain.bands.desert_below > self.terrain.bands.rocky_above {
            return Err(Error::Config(format!(
                "terrain.bands.desert_below ({}) exceeds rocky_above ({})",
                self.terrain.bands.desert_below, self.terrain.bands.rocky_above
            )));
        }
        self.placement.validate()
    }
}

/// Density and attribute ranges for one resource type
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceTypeConfig {
    /// Mean candidates per chunk; the fractional part is an acceptance chance
    pub density: f32,
    /// Capacity range before the biome multiplier
    pub min_capacity: f32,
    pub max_capacity: f32,
    /// Fraction of placed records that start hidden
    pub hidden_fraction: f32,
    /// Keep-out distance from chunk edges, in world units
    pub edge_margin: f32,
}

impl Default for ResourceTypeConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            min_capacity: 1.0,
            max_capacity: 1.0,
            hidden_fraction: 0.0,
            edge_margin: 4.0,
        }
    }
}

impl ResourceTypeConfig {
    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.density.is_finite() || !(0.0..=MAX_DENSITY).contains(&self.density) {
            return Err(Error::Config(format!(
                "{name}.density must be in [0, {MAX_DENSITY}], got {}",
                self.density
            )));
        }
        if self.min_capacity.is_nan() || self.max_capacity.is_nan() || self.min_capacity > self.max_capacity {
            return Err(Error::Config(format!(
                "{name}.min_capacity ({}) exceeds max_capacity ({})",
                self.min_capacity, self.max_capacity
            )));
        }
        if !(0.0..=1.0).contains(&self.hidden_fraction) {
            return Err(Error::Config(format!(
                "{name}.hidden_fraction must be in [0, 1], got {}",
                self.hidden_fraction
            )));
        }
        if self.edge_margin.is_nan() || self.edge_margin < 0.0 {
            return Err(Error::Config(format!("{name}.edge_margin must be >= 0")));
        }
        Ok(())
    }
}

/// Configuration for per-chunk resource placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub minerals: ResourceTypeConfig,
    pub vegetation: ResourceTypeConfig,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            minerals: ResourceTypeConfig {
                density: 2.5,
                min_capacity: 200.0,
                max_capacity: 800.0,
                hidden_fraction: 0.3,
                edge_margin: 4.0,
            },
            vegetation: ResourceTypeConfig {
                density: 6.0,
                min_capacity: 0.6,
                max_capacity: 1.4,
                hidden_fraction: 0.0,
                edge_margin: 2.0,
            },
        }
    }
}

impl PlacementConfig {
    /// No resources at all
    pub fn empty() -> Self {
        let none = ResourceTypeConfig { density: 0.0, ..Default::default() };
        Self { minerals: none, vegetation: none }
    }

    pub fn validate(&self) -> Result<()> {
        self.minerals.validate("minerals")?;
        self.vegetation.validate("vegetation")
    }
}
