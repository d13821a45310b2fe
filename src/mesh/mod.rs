//! Chunk geometry: heightfield triangulation, normals and seam blending

pub mod geometry;
pub mod builder;

pub use geometry::{GeometryDescriptor, TerrainVertex};
pub use builder::{ChunkMeshBuilder, MeshParams};
