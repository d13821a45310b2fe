//! Placed point resources: mineral deposits and vegetation

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::terrain::biome::Biome;
use crate::terrain::coords::{ChunkCoord, ChunkKey};

/// Resource categories placed per chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Mineral,
    Vegetation,
}

impl ResourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Mineral => "mineral",
            ResourceKind::Vegetation => "vegetation",
        }
    }

    /// Capacity multiplier by biome
    pub fn capacity_multiplier(&self, biome: Biome) -> f32 {
        match (self, biome) {
            (ResourceKind::Mineral, Biome::Rocky) => 1.5,
            (ResourceKind::Mineral, Biome::Desert) => 1.2,
            (ResourceKind::Mineral, Biome::Vegetation) => 0.8,
            (ResourceKind::Vegetation, Biome::Vegetation) => 1.0,
            (ResourceKind::Vegetation, Biome::Desert) => 0.6,
            (ResourceKind::Vegetation, Biome::Rocky) => 0.7,
        }
    }

    /// Probability a candidate in `biome` is kept
    pub fn acceptance(&self, biome: Biome) -> f32 {
        match (self, biome) {
            (ResourceKind::Mineral, _) => 1.0,
            (ResourceKind::Vegetation, Biome::Vegetation) => 0.95,
            (ResourceKind::Vegetation, Biome::Desert) => 0.1,
            (ResourceKind::Vegetation, Biome::Rocky) => 0.2,
        }
    }
}

/// Stable identifier of a placed resource.
///
/// `index` is the candidate slot in the chunk, so ids survive regeneration
/// even when neighbouring candidates are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    pub chunk: ChunkCoord,
    pub kind: ResourceKind,
    pub index: u32,
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.kind.name(), self.chunk.key(), self.index)
    }
}

/// A resource placed at a world position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub position: Vec3,
    pub capacity: f32,
    pub biome: Biome,
    /// Hidden records need an explicit discover before they are interactable
    pub visible: bool,
    /// Owning chunk (lookup key, not ownership)
    pub chunk: ChunkKey,
}

impl ResourceRecord {
    /// Mark as discovered; returns whether the flag changed
    pub fn discover(&mut self) -> bool {
        let changed = !self.visible;
        self.visible = true;
        changed
    }

    /// Horizontal (XZ) distance to a point
    pub fn distance_xz(&self, point: Vec3) -> f32 {
        let dx = self.position.x - point.x;
        let dz = self.position.z - point.z;
        (dx * dx + dz * dz).sqrt()
    }
}
