//! Renderable geometry descriptor handed to the render host

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex layout for host upload (36 bytes, no padding)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    /// Chunk-local position (12 bytes, offset 0)
    pub position: [f32; 3],
    /// Unit normal (12 bytes, offset 12)
    pub normal: [f32; 3],
    /// Linear RGB color (12 bytes, offset 24)
    pub color: [f32; 3],
}

/// Triangle mesh of one chunk in chunk-local space.
///
/// The host translates the whole mesh by the chunk's world origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryDescriptor {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub colors: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

impl GeometryDescriptor {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Pack positions, normals and colors into one vertex buffer
    pub fn interleaved(&self) -> Vec<TerrainVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.colors)
            .map(|((&position, &normal), &color)| TerrainVertex { position, normal, color })
            .collect()
    }

    /// Raw index bytes for an index buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Approximate heap footprint in bytes
    pub fn memory_usage(&self) -> usize {
        (self.positions.len() + self.colors.len() + self.normals.len()) * std::mem::size_of::<[f32; 3]>()
            + self.indices.len() * std::mem::size_of::<u32>()
    }
}
