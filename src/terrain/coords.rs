//! Chunk grid coordinates and world-space mapping

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Default side length of a chunk in world units
pub const DEFAULT_CHUNK_SIZE: f32 = 64.0;

/// Integer coordinate identifying a chunk in the (unbounded) XZ grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert a world position to the chunk containing it.
    ///
    /// Floor division, so each chunk owns the half-open footprint
    /// `[origin, origin + chunk_size)` on both axes.
    pub fn from_world(world_x: f32, world_z: f32, chunk_size: f32) -> Self {
        Self {
            x: (world_x / chunk_size).floor() as i32,
            z: (world_z / chunk_size).floor() as i32,
        }
    }

    /// Convert a 3D world position (y ignored) to its chunk
    pub fn from_world_pos(pos: Vec3, chunk_size: f32) -> Self {
        Self::from_world(pos.x, pos.z, chunk_size)
    }

    /// World-space origin (minimum corner) of this chunk, as (x, z)
    pub fn world_origin(&self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_size, self.z as f32 * chunk_size)
    }

    /// World-space center of this chunk's footprint, as (x, z)
    pub fn world_center(&self, chunk_size: f32) -> Vec2 {
        self.world_origin(chunk_size) + Vec2::splat(chunk_size * 0.5)
    }

    /// Canonical registry key
    pub fn key(&self) -> ChunkKey {
        ChunkKey(((self.x as u32 as u64) << 32) | self.z as u32 as u64)
    }

    /// Grid distance (max of per-axis deltas)
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> u32 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dz = (self.z as i64 - other.z as i64).unsigned_abs();
        dx.max(dz) as u32
    }

    /// All coordinates within `radius` grid steps, row by row
    pub fn neighbors_within(&self, radius: u32) -> impl Iterator<Item = ChunkCoord> + use<> {
        let r = radius as i32;
        let center = *self;
        (-r..=r).flat_map(move |dz| {
            (-r..=r).map(move |dx| ChunkCoord::new(center.x + dx, center.z + dz))
        })
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Collision-free key for a chunk coordinate.
///
/// Packs both 32-bit components into one `u64`, so key equality is exactly
/// component-wise coordinate equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey(u64);

impl ChunkKey {
    /// Recover the coordinate this key was made from
    pub fn coord(&self) -> ChunkCoord {
        ChunkCoord::new((self.0 >> 32) as u32 as i32, self.0 as u32 as i32)
    }
}

impl From<ChunkCoord> for ChunkKey {
    fn from(coord: ChunkCoord) -> Self {
        coord.key()
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.coord();
        write!(f, "{},{}", c.x, c.z)
    }
}
