//! Noise-based procedural height and biome fields

use glam::Vec2;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::biome::{Biome, BiomeBands};
use super::field::{FieldGrid, TerrainField};

/// Apron (in samples) generated around each chunk for edge blending
pub const DEFAULT_FIELD_APRON: u32 = 2;

/// Parameters controlling terrain generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub scale: f32,        // Horizontal scale (larger = smoother)
    pub height_scale: f32, // Vertical scale (max height)
    pub octaves: u32,      // FBM octaves (detail levels)
    pub persistence: f32,  // FBM persistence (0.5 typical)
    pub lacunarity: f32,   // FBM lacunarity (2.0 typical)
    pub bands: BiomeBands,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            scale: 100.0,
            height_scale: 64.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            bands: BiomeBands::default(),
        }
    }
}

/// Procedural terrain generator using fractal Brownian motion (FBM).
///
/// The seed is fixed at construction. Every output is a pure function of
/// world coordinates, so neighbouring chunks agree on their shared edges.
pub struct TerrainGenerator {
    seed: u32,
    params: TerrainParams,
    noise: Fbm<Perlin>,
}

impl TerrainGenerator {
    /// Create a new terrain generator
    pub fn new(seed: u32, params: TerrainParams) -> Self {
        let noise = Fbm::<Perlin>::new(seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        Self { seed, params, noise }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Noise value at (x, z) mapped to [0, 1]
    fn normalized_at(&self, x: f32, z: f32) -> f32 {
        let nx = (x / self.params.scale) as f64;
        let nz = (z / self.params.scale) as f64;

        // Fbm output is nominally [-1, 1]; clamp the rare overshoot
        let noise_value = self.noise.get([nx, nz]);
        ((noise_value + 1.0) / 2.0).clamp(0.0, 1.0) as f32
    }

    /// Terrain height at world position (x, z), in [0, height_scale]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.normalized_at(x, z) * self.params.height_scale
    }

    /// Biome at world position (x, z)
    pub fn biome_at(&self, x: f32, z: f32) -> Biome {
        self.classify_height(self.height_at(x, z))
    }

    /// Classify an absolute height produced by this generator
    pub fn classify_height(&self, height: f32) -> Biome {
        let normalized = if self.params.height_scale > 0.0 {
            height / self.params.height_scale
        } else {
            0.0
        };
        Biome::classify(normalized, &self.params.bands)
    }

    /// Sample height and biome over a square world rectangle.
    ///
    /// Produces `(resolution + 1)²` primary samples plus the default apron.
    /// Panics when `size` is not positive or `resolution` is zero.
    pub fn generate_field(&self, origin_x: f32, origin_z: f32, size: f32, resolution: u32) -> TerrainField {
        self.generate_field_with_apron(origin_x, origin_z, size, resolution, DEFAULT_FIELD_APRON)
    }

    /// Like [`generate_field`](Self::generate_field) with an explicit apron width
    pub fn generate_field_with_apron(
        &self,
        origin_x: f32,
        origin_z: f32,
        size: f32,
        resolution: u32,
        apron: u32,
    ) -> TerrainField {
        assert!(size > 0.0, "field size must be positive, got {size}");
        assert!(resolution >= 1, "field resolution must be at least 1");

        let step = size / resolution as f32;
        let heights = FieldGrid::from_fn(resolution, apron, |i, j| {
            self.height_at(origin_x + i as f32 * step, origin_z + j as f32 * step)
        });
        let biomes = FieldGrid::from_fn(resolution, apron, |i, j| {
            self.classify_height(heights.get(i, j))
        });

        TerrainField::new(Vec2::new(origin_x, origin_z), size, heights, biomes)
    }
}
