//! Heightfield chunk meshing with seam color blending

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::GeometryDescriptor;
use crate::terrain::field::{BiomeField, HeightField, TerrainField};

/// Parameters for edge color blending
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParams {
    /// Vertices at most this many grid steps from a chunk edge get blended
    pub blend_margin: u32,
    /// Neighbourhood radius (grid steps) sampled around a blended vertex
    pub blend_radius: u32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            blend_margin: 2,
            blend_radius: 2,
        }
    }
}

/// Builds chunk-local triangle meshes from sampled terrain fields
#[derive(Clone, Debug, Default)]
pub struct ChunkMeshBuilder {
    params: MeshParams,
}

impl ChunkMeshBuilder {
    pub fn new(params: MeshParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MeshParams {
        &self.params
    }

    /// Mesh a terrain field
    pub fn build(&self, field: &TerrainField) -> GeometryDescriptor {
        self.build_from_fields(&field.heights, &field.biomes, field.size, field.resolution())
    }

    /// Mesh separate height and biome grids.
    ///
    /// Produces `(resolution + 1)²` vertices and `2 * resolution²` triangles.
    /// Panics if either grid does not match `resolution` or the grids differ
    /// in shape.
    pub fn build_from_fields(
        &self,
        heights: &HeightField,
        biomes: &BiomeField,
        chunk_size: f32,
        resolution: u32,
    ) -> GeometryDescriptor {
        assert!(resolution >= 1, "mesh resolution must be at least 1");
        assert!(chunk_size > 0.0, "chunk size must be positive, got {chunk_size}");
        assert!(
            heights.resolution() == resolution && heights.same_shape(biomes),
            "field dimensions mismatch: heights {} (apron {}), biomes {} (apron {}), expected {}",
            heights.resolution(),
            heights.apron(),
            biomes.resolution(),
            biomes.apron(),
            resolution
        );

        let positions = Self::positions(heights, chunk_size, resolution);
        let indices = Self::indices(resolution);
        let normals = Self::normals(&positions, &indices);
        let colors = self.colors(biomes, resolution);

        GeometryDescriptor {
            positions: positions.iter().map(|p| p.to_array()).collect(),
            indices,
            colors: colors.iter().map(|c| c.to_array()).collect(),
            normals: normals.iter().map(|n| n.to_array()).collect(),
        }
    }

    fn positions(heights: &HeightField, chunk_size: f32, resolution: u32) -> Vec<Vec3> {
        let n = resolution as i32;
        let step = chunk_size / resolution as f32;
        let mut positions = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
        for j in 0..=n {
            for i in 0..=n {
                positions.push(Vec3::new(i as f32 * step, heights.get(i, j), j as f32 * step));
            }
        }
        positions
    }

    /// Two triangles per cell with one winding for the whole mesh
    fn indices(resolution: u32) -> Vec<u32> {
        let side = resolution + 1;
        let at = |i: u32, j: u32| j * side + i;

        let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
        for j in 0..resolution {
            for i in 0..resolution {
                indices.extend_from_slice(&[at(i, j), at(i, j + 1), at(i + 1, j)]);
                indices.extend_from_slice(&[at(i + 1, j), at(i, j + 1), at(i + 1, j + 1)]);
            }
        }
        indices
    }

    /// Face normals averaged into vertex normals
    fn normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; positions.len()];
        for tri in indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = (positions[b] - positions[a])
                .cross(positions[c] - positions[a])
                .normalize_or_zero();
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for n in &mut normals {
            let unit = n.normalize_or_zero();
            *n = if unit == Vec3::ZERO { Vec3::Y } else { unit };
        }
        normals
    }

    fn colors(&self, biomes: &BiomeField, resolution: u32) -> Vec<Vec3> {
        let n = resolution as i32;
        let mut colors = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
        for j in 0..=n {
            for i in 0..=n {
                let edge_distance = i.min(j).min(n - i).min(n - j);
                let color = if edge_distance <= self.params.blend_margin as i32 {
                    self.blended_color(biomes, i, j)
                } else {
                    biomes.get(i, j).base_color()
                };
                colors.push(color);
            }
        }
        colors
    }

    /// Inverse-distance weighted mix of differing neighbour biomes.
    ///
    /// The vertex's own color has weight 1; each neighbour whose biome
    /// differs adds its base color with weight `1 / distance`. Neighbours
    /// beyond the stored apron are skipped.
    fn blended_color(&self, biomes: &BiomeField, i: i32, j: i32) -> Vec3 {
        let own = biomes.get(i, j);
        let r = self.params.blend_radius as i32;

        let mut sum = own.base_color();
        let mut weight = 1.0;
        for dj in -r..=r {
            for di in -r..=r {
                if di == 0 && dj == 0 {
                    continue;
                }
                let Some(other) = biomes.try_get(i + di, j + dj) else {
                    continue;
                };
                if other == own {
                    continue;
                }
                let w = 1.0 / ((di * di + dj * dj) as f32).sqrt();
                sum += other.base_color() * w;
                weight += w;
            }
        }
        sum / weight
    }
}
