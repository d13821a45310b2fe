//! Per-chunk seeded pseudo-random sequence

use crate::terrain::coords::ChunkCoord;

/// Multiplier applied to the chunk x index when deriving a chunk seed
const CHUNK_X_MULTIPLIER: u32 = 73_856_093;

/// Independent consumers of per-chunk randomness.
///
/// Each stream offsets the chunk seed differently so two consumers of the
/// same chunk never draw from the same sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeedStream {
    Minerals,
    Vegetation,
}

impl SeedStream {
    pub fn offset(&self) -> u32 {
        match self {
            SeedStream::Minerals => 19_349_663,
            SeedStream::Vegetation => 83_492_791,
        }
    }
}

/// 32-bit linear congruential generator.
///
/// The whole state is one integer: two sequences built from the same seed
/// yield the same stream forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkSequence {
    state: u32,
}

impl ChunkSequence {
    const MULTIPLIER: u32 = 1_664_525;
    const INCREMENT: u32 = 1_013_904_223;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Sequence for one chunk and consumer:
    /// `global_seed + x * K + z + stream offset`, all wrapping.
    pub fn for_chunk(global_seed: u32, coord: ChunkCoord, stream: SeedStream) -> Self {
        Self::new(Self::chunk_seed(global_seed, coord, stream))
    }

    pub fn chunk_seed(global_seed: u32, coord: ChunkCoord, stream: SeedStream) -> u32 {
        global_seed
            .wrapping_add((coord.x as u32).wrapping_mul(CHUNK_X_MULTIPLIER))
            .wrapping_add(coord.z as u32)
            .wrapping_add(stream.offset())
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state
    }

    /// Next value in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit an f32 mantissa exactly, so the result never rounds up to 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    /// True with probability `p`; always consumes one draw
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}
