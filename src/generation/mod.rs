//! Chunk generation pipeline: terrain geometry and resources per chunk.
//!
//! The pipeline orchestrates, per chunk coordinate:
//! 1. Height/biome field sampling (TerrainGenerator)
//! 2. Mesh construction with seam blending (ChunkMeshBuilder)
//! 3. Deterministic resource placement (ResourcePlacer)

pub mod config;
pub mod sequence;
pub mod resource;
pub mod placer;

pub use config::{GenerationConfig, PlacementConfig, ResourceTypeConfig};
pub use sequence::{ChunkSequence, SeedStream};
pub use resource::{ResourceId, ResourceKind, ResourceRecord};
pub use placer::ResourcePlacer;

use crate::mesh::{ChunkMeshBuilder, GeometryDescriptor};
use crate::terrain::biome::Biome;
use crate::terrain::coords::ChunkCoord;
use crate::terrain::field::TerrainField;
use crate::terrain::generator::TerrainGenerator;

/// Result of generating a single chunk: geometry + placed resources.
pub struct GeneratedChunk {
    pub coord: ChunkCoord,
    pub geometry: GeometryDescriptor,
    pub resources: Vec<ResourceRecord>,
}

/// Orchestrates chunk generation: field → mesh → resources.
pub struct GenerationPipeline {
    terrain: TerrainGenerator,
    mesher: ChunkMeshBuilder,
    placer: ResourcePlacer,
    chunk_size: f32,
    resolution: u32,
}

impl GenerationPipeline {
    /// Create a new pipeline from configuration.
    ///
    /// Panics on a non-positive chunk size or zero resolution; run
    /// `GenerationConfig::validate` first for untrusted input.
    pub fn new(config: &GenerationConfig) -> Self {
        assert!(config.chunk_size > 0.0, "chunk size must be positive, got {}", config.chunk_size);
        assert!(config.resolution >= 1, "resolution must be at least 1");

        Self {
            terrain: TerrainGenerator::new(config.seed, config.terrain.clone()),
            mesher: ChunkMeshBuilder::new(config.mesh),
            placer: ResourcePlacer::new(config.seed, config.placement.clone()),
            chunk_size: config.chunk_size,
            resolution: config.resolution,
        }
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Sample the height/biome field over one chunk's footprint
    pub fn field(&self, coord: ChunkCoord) -> TerrainField {
        let origin = coord.world_origin(self.chunk_size);
        self.terrain.generate_field(origin.x, origin.y, self.chunk_size, self.resolution)
    }

    /// Generate a single chunk: field, then mesh, then resources.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> GeneratedChunk {
        let field = self.field(coord);
        let geometry = self.mesher.build(&field);
        let resources = self.placer.place_in_chunk(coord, &field);

        GeneratedChunk { coord, geometry, resources }
    }

    /// Terrain height at any world position, loaded or not.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.terrain.height_at(x, z)
    }

    /// Biome at any world position, loaded or not.
    pub fn biome_at(&self, x: f32, z: f32) -> Biome {
        self.terrain.biome_at(x, z)
    }
}
