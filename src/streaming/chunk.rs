//! Resident chunk state owned by the streaming registry

use glam::Vec2;

use super::host::Drawable;
use crate::generation::ResourceRecord;
use crate::mesh::GeometryDescriptor;
use crate::terrain::coords::{ChunkCoord, ChunkKey};

/// A built, registered chunk.
///
/// Never rebuilt in place: reloading disposes it and builds a new one.
/// Teardown order is records, then the drawable, then the registry entry.
pub struct Chunk<D: Drawable> {
    /// Coordinate of this chunk in the world grid
    pub coord: ChunkCoord,
    /// Chunk-local geometry the drawable was built from
    pub geometry: GeometryDescriptor,
    /// Placed resources, in placement order
    pub resources: Vec<ResourceRecord>,
    /// `None` once released
    drawable: Option<D>,
}

impl<D: Drawable> Chunk<D> {
    pub fn new(
        coord: ChunkCoord,
        geometry: GeometryDescriptor,
        resources: Vec<ResourceRecord>,
        drawable: D,
    ) -> Self {
        Self { coord, geometry, resources, drawable: Some(drawable) }
    }

    pub fn key(&self) -> ChunkKey {
        self.coord.key()
    }

    pub fn drawable(&self) -> Option<&D> {
        self.drawable.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.drawable.is_none()
    }

    /// XZ distance from this chunk's center to a point
    pub fn center_distance(&self, point: Vec2, chunk_size: f32) -> f32 {
        self.coord.world_center(chunk_size).distance(point)
    }

    /// Drop the records, then dispose the drawable. Idempotent.
    pub fn release(&mut self) {
        self.resources.clear();
        if let Some(drawable) = self.drawable.take() {
            drawable.dispose();
        }
    }
}
