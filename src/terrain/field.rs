//! Sampled height and biome grids for one chunk footprint

use glam::Vec2;

use super::biome::Biome;

/// Square grid of samples over a chunk footprint, with an apron.
///
/// Primary samples are indexed `0..=resolution` on each axis. The apron adds
/// `apron` extra samples past every edge, addressed with negative indices or
/// indices above `resolution`. Storage is row-major with `i` along x.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldGrid<T> {
    resolution: u32,
    apron: u32,
    values: Vec<T>,
}

impl<T: Copy> FieldGrid<T> {
    /// Build a grid by evaluating `sample(i, j)` for every index, apron included
    pub fn from_fn(resolution: u32, apron: u32, mut sample: impl FnMut(i32, i32) -> T) -> Self {
        assert!(resolution >= 1, "field resolution must be at least 1");
        let lo = -(apron as i32);
        let hi = (resolution + apron) as i32;
        let side = (resolution + 1 + 2 * apron) as usize;

        let mut values = Vec::with_capacity(side * side);
        for j in lo..=hi {
            for i in lo..=hi {
                values.push(sample(i, j));
            }
        }

        Self { resolution, apron, values }
    }

    /// Samples per side excluding the apron (`resolution + 1`)
    pub fn side(&self) -> u32 {
        self.resolution + 1
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn apron(&self) -> u32 {
        self.apron
    }

    /// Whether `(i, j)` addresses a stored sample
    pub fn contains(&self, i: i32, j: i32) -> bool {
        let lo = -(self.apron as i32);
        let hi = (self.resolution + self.apron) as i32;
        (lo..=hi).contains(&i) && (lo..=hi).contains(&j)
    }

    /// Sample at `(i, j)`; panics outside the grid and apron
    pub fn get(&self, i: i32, j: i32) -> T {
        assert!(
            self.contains(i, j),
            "field index ({i}, {j}) outside resolution {} with apron {}",
            self.resolution,
            self.apron
        );
        let stored_side = (self.resolution + 1 + 2 * self.apron) as usize;
        let si = (i + self.apron as i32) as usize;
        let sj = (j + self.apron as i32) as usize;
        self.values[sj * stored_side + si]
    }

    /// Sample at `(i, j)` if stored
    pub fn try_get(&self, i: i32, j: i32) -> Option<T> {
        self.contains(i, j).then(|| self.get(i, j))
    }

    /// Primary samples only (no apron), row-major
    pub fn primary(&self) -> Vec<T> {
        let n = self.resolution as i32;
        let mut out = Vec::with_capacity(self.side() as usize * self.side() as usize);
        for j in 0..=n {
            for i in 0..=n {
                out.push(self.get(i, j));
            }
        }
        out
    }

    /// Whether both grids have the same resolution and apron
    pub fn same_shape<U>(&self, other: &FieldGrid<U>) -> bool {
        self.resolution == other.resolution && self.apron == other.apron
    }
}

/// Grid of terrain heights
pub type HeightField = FieldGrid<f32>;

/// Grid of biome labels
pub type BiomeField = FieldGrid<Biome>;

/// Height and biome fields sampled over one chunk footprint
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainField {
    /// World-space (x, z) of sample (0, 0)
    pub origin: Vec2,
    /// Footprint side length in world units
    pub size: f32,
    pub heights: HeightField,
    pub biomes: BiomeField,
}

impl TerrainField {
    /// Pair up height and biome grids; panics when their shapes differ
    pub fn new(origin: Vec2, size: f32, heights: HeightField, biomes: BiomeField) -> Self {
        assert!(size > 0.0, "field size must be positive, got {size}");
        assert!(
            heights.same_shape(&biomes),
            "height field ({}, apron {}) and biome field ({}, apron {}) differ in shape",
            heights.resolution(),
            heights.apron(),
            biomes.resolution(),
            biomes.apron()
        );
        Self { origin, size, heights, biomes }
    }

    pub fn resolution(&self) -> u32 {
        self.heights.resolution()
    }

    /// World distance between neighbouring samples
    pub fn step(&self) -> f32 {
        self.size / self.resolution() as f32
    }

    /// Biome of the sample nearest to a chunk-local (x, z) position
    pub fn biome_at_local(&self, local: Vec2) -> Biome {
        let (i, j) = self.nearest_index(local);
        self.biomes.get(i, j)
    }

    /// Bilinearly interpolated height at a chunk-local (x, z) position
    pub fn height_at_local(&self, local: Vec2) -> f32 {
        let n = self.resolution() as f32;
        let fx = (local.x / self.step()).clamp(0.0, n);
        let fz = (local.y / self.step()).clamp(0.0, n);

        let i0 = (fx.floor() as i32).min(self.resolution() as i32 - 1);
        let j0 = (fz.floor() as i32).min(self.resolution() as i32 - 1);
        let tx = fx - i0 as f32;
        let tz = fz - j0 as f32;

        let h00 = self.heights.get(i0, j0);
        let h10 = self.heights.get(i0 + 1, j0);
        let h01 = self.heights.get(i0, j0 + 1);
        let h11 = self.heights.get(i0 + 1, j0 + 1);

        let a = h00 + (h10 - h00) * tx;
        let b = h01 + (h11 - h01) * tx;
        a + (b - a) * tz
    }

    fn nearest_index(&self, local: Vec2) -> (i32, i32) {
        let n = self.resolution() as i32;
        let i = ((local.x / self.step()).round() as i32).clamp(0, n);
        let j = ((local.y / self.step()).round() as i32).clamp(0, n);
        (i, j)
    }
}
