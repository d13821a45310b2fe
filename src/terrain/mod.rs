//! Procedural terrain: chunk grid, height/biome fields

pub mod coords;
pub use coords::{ChunkCoord, ChunkKey, DEFAULT_CHUNK_SIZE};

pub mod field;
pub use field::{BiomeField, FieldGrid, HeightField, TerrainField};

pub mod generator;
pub use generator::{TerrainGenerator, TerrainParams, DEFAULT_FIELD_APRON};

pub mod biome;
pub use biome::{Biome, BiomeBands};
