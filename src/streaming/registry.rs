//! Registry of resident chunks
//!
//! Maps canonical chunk keys to the chunks the streaming manager owns.
//! Single-threaded; the manager is the only writer.

use std::collections::HashMap;

use super::chunk::Chunk;
use super::host::Drawable;
use crate::terrain::coords::{ChunkCoord, ChunkKey};

/// Owned map from chunk key to resident chunk
pub struct ChunkRegistry<D: Drawable> {
    chunks: HashMap<ChunkKey, Chunk<D>>,
}

impl<D: Drawable> ChunkRegistry<D> {
    pub fn new() -> Self {
        Self { chunks: HashMap::new() }
    }

    /// Get a chunk by coordinate
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk<D>> {
        self.chunks.get(&coord.key())
    }

    /// Get a mutable chunk by coordinate
    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk<D>> {
        self.chunks.get_mut(&coord.key())
    }

    /// Insert a chunk
    ///
    /// # Returns
    /// The chunk previously registered at the same coordinate, if any
    pub fn insert(&mut self, chunk: Chunk<D>) -> Option<Chunk<D>> {
        self.chunks.insert(chunk.key(), chunk)
    }

    /// Remove a chunk, handing ownership back to the caller
    pub fn remove(&mut self, coord: ChunkCoord) -> Option<Chunk<D>> {
        self.chunks.remove(&coord.key())
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord.key())
    }

    /// Get the number of resident chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate over all resident coordinates
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().map(|k| k.coord())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk<D>> {
        self.chunks.values()
    }
}

impl<D: Drawable> Default for ChunkRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::GeometryDescriptor;

    struct Dummy;

    impl Drawable for Dummy {
        fn dispose(self) {}
    }

    fn make_chunk(x: i32, z: i32) -> Chunk<Dummy> {
        Chunk::new(ChunkCoord::new(x, z), GeometryDescriptor::default(), Vec::new(), Dummy)
    }

    #[test]
    fn test_registry_new() {
        let registry: ChunkRegistry<Dummy> = ChunkRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_insert_and_get() {
        let mut registry = ChunkRegistry::new();
        let coord = ChunkCoord::new(1, -2);

        assert!(registry.insert(make_chunk(1, -2)).is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(coord));
        assert_eq!(registry.get(coord).unwrap().coord, coord);
        assert!(registry.get_mut(coord).is_some());
        assert!(registry.get(ChunkCoord::new(-2, 1)).is_none());
    }

    #[test]
    fn test_registry_insert_replace() {
        let mut registry = ChunkRegistry::new();
        registry.insert(make_chunk(3, 3));
        let replaced = registry.insert(make_chunk(3, 3));
        assert_eq!(replaced.unwrap().coord, ChunkCoord::new(3, 3));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_remove() {
        let mut registry = ChunkRegistry::new();
        registry.insert(make_chunk(0, 0));

        let removed = registry.remove(ChunkCoord::new(0, 0));
        assert_eq!(removed.unwrap().coord, ChunkCoord::new(0, 0));
        assert!(registry.is_empty());

        // Removing an absent coordinate is a no-op
        assert!(registry.remove(ChunkCoord::new(0, 0)).is_none());
    }

    #[test]
    fn test_registry_coords() {
        let mut registry = ChunkRegistry::new();
        registry.insert(make_chunk(1, 2));
        registry.insert(make_chunk(-4, 5));
        registry.insert(make_chunk(7, -8));

        let mut coords: Vec<_> = registry.coords().collect();
        coords.sort();
        assert_eq!(coords, vec![ChunkCoord::new(-4, 5), ChunkCoord::new(1, 2), ChunkCoord::new(7, -8)]);

        assert_eq!(registry.iter().count(), 3);
    }
}
