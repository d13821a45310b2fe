//! Streaming Manager - keeps the chunks around a moving viewpoint built
//!
//! Each update reads the viewpoint, and when it has moved far enough since the
//! last scan, builds every absent chunk within the load radius and disposes
//! every resident chunk beyond the unload radius. Chunk construction is atomic
//! from the manager's point of view: a chunk is either fully registered or
//! absent.

use glam::{Vec2, Vec3};

use super::chunk::Chunk;
use super::config::StreamingConfig;
use super::host::{RenderHost, ViewpointProvider};
use super::registry::ChunkRegistry;
use super::stats::{StreamingStats, TickReport};
use crate::core::Result;
use crate::generation::{GenerationPipeline, ResourceId, ResourceRecord};
use crate::terrain::biome::Biome;
use crate::terrain::coords::ChunkCoord;

/// Streaming manager owning all resident chunks
pub struct StreamingManager<H: RenderHost> {
    config: StreamingConfig,
    pipeline: GenerationPipeline,
    host: H,
    registry: ChunkRegistry<H::Drawable>,
    /// Viewpoint position at the last full scan
    last_scan_pos: Option<Vec3>,
    /// Work was left over (cap or host failure); scan again next tick
    scan_pending: bool,
    stats: StreamingStats,
}

impl<H: RenderHost> StreamingManager<H> {
    /// Create a new streaming manager.
    ///
    /// Panics on a degenerate chunk size or resolution. Logs a warning when
    /// the unload radius does not clear the corners of the load square; the
    /// unload step then keeps those chunks and they stay resident beyond
    /// `unload_radius`.
    pub fn new(config: StreamingConfig, host: H) -> Self {
        if !config.radii_are_consistent() {
            log::warn!(
                "unload radius {} does not clear load radius {} (corners reach {:.2} chunks)",
                config.unload_radius,
                config.load_radius,
                config.max_load_distance()
            );
        }

        let pipeline = GenerationPipeline::new(&config.generation);
        log::info!(
            "StreamingManager: seed {}, chunk size {}, resolution {}, load radius {}, unload radius {}",
            config.generation.seed,
            config.generation.chunk_size,
            config.generation.resolution,
            config.load_radius,
            config.unload_radius
        );

        Self {
            config,
            pipeline,
            host,
            registry: ChunkRegistry::new(),
            last_scan_pos: None,
            scan_pending: false,
            stats: StreamingStats::default(),
        }
    }

    /// Validate the config, then create the manager
    pub fn try_new(config: StreamingConfig, host: H) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, host))
    }

    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn chunk_size(&self) -> f32 {
        self.config.generation.chunk_size
    }

    /// Per-frame update from a viewpoint provider
    pub fn update(&mut self, viewpoint: &impl ViewpointProvider) -> TickReport {
        self.update_at(viewpoint.position())
    }

    /// Per-frame update at an explicit viewpoint position.
    ///
    /// Scans only on the first call, after the viewpoint moved more than
    /// `rescan_threshold` (XZ distance) since the last scan, or when the
    /// previous scan left work behind. Otherwise a no-op.
    pub fn update_at(&mut self, position: Vec3) -> TickReport {
        let moved = match self.last_scan_pos {
            None => true,
            Some(last) => xz(last).distance(xz(position)) > self.config.rescan_threshold,
        };

        if !moved && !self.scan_pending {
            log::trace!("update at {:?}: below rescan threshold", position);
            return TickReport::default();
        }

        self.scan(position)
    }

    /// Full scan at `position`: load step, then unload step
    pub fn scan(&mut self, position: Vec3) -> TickReport {
        let center = ChunkCoord::from_world_pos(position, self.chunk_size());

        let mut report = TickReport { scanned: true, ..Default::default() };
        self.load_around(center, position, &mut report);
        report.unloaded = self.unload_beyond(center, position);

        self.last_scan_pos = Some(position);
        self.scan_pending = report.deferred > 0 || report.failed > 0;
        self.stats.record(&report);

        if report.changed() || report.failed > 0 {
            log::info!(
                "scan at chunk {}: built {}, unloaded {}, failed {}, deferred {}, resident {}",
                center,
                report.built,
                report.unloaded,
                report.failed,
                report.deferred,
                self.registry.len()
            );
        }
        report
    }

    /// Build absent chunks within the load radius, nearest first
    fn load_around(&mut self, center: ChunkCoord, position: Vec3, report: &mut TickReport) {
        let size = self.chunk_size();
        let viewpoint = xz(position);

        let mut missing: Vec<(f32, ChunkCoord)> = center
            .neighbors_within(self.config.load_radius)
            .filter(|c| !self.registry.contains(*c))
            .map(|c| (c.world_center(size).distance_squared(viewpoint), c))
            .collect();
        missing.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let budget = self.config.max_builds_per_tick.unwrap_or(usize::MAX);
        for (_, coord) in missing.iter().take(budget) {
            // A failure only affects this coordinate; keep scanning
            match self.build_chunk(*coord) {
                Ok(()) => report.built += 1,
                Err(e) => {
                    log::warn!("chunk {} failed to build: {}", coord, e);
                    report.failed += 1;
                }
            }
        }
        report.deferred = missing.len().saturating_sub(budget);
    }

    /// Dispose resident chunks whose center is beyond the unload distance.
    ///
    /// Chunks inside the load square of `center` are never unloaded, so the
    /// load step's work survives even when the radii are inconsistent.
    fn unload_beyond(&mut self, center: ChunkCoord, position: Vec3) -> usize {
        let size = self.chunk_size();
        let limit = self.config.unload_radius * size;
        let load_radius = self.config.load_radius;
        let viewpoint = xz(position);

        let far: Vec<ChunkCoord> = self
            .registry
            .iter()
            .filter(|chunk| chunk.coord.chebyshev_distance(center) > load_radius)
            .filter(|chunk| chunk.center_distance(viewpoint, size) > limit)
            .map(|chunk| chunk.coord)
            .collect();

        far.into_iter().filter(|c| self.dispose_chunk(*c)).count()
    }

    /// Generate, submit and register one chunk
    fn build_chunk(&mut self, coord: ChunkCoord) -> Result<()> {
        let generated = self.pipeline.generate_chunk(coord);
        let origin = coord.world_origin(self.chunk_size());
        let drawable = self.host.submit(&generated.geometry, Vec3::new(origin.x, 0.0, origin.y))?;

        log::debug!(
            "loaded chunk {}: {} triangles, {} resources",
            coord,
            generated.geometry.triangle_count(),
            generated.resources.len()
        );
        self.registry.insert(Chunk::new(coord, generated.geometry, generated.resources, drawable));
        Ok(())
    }

    /// Build a chunk if absent.
    ///
    /// Returns `Ok(false)` without doing anything when it is already resident.
    pub fn load_chunk(&mut self, coord: ChunkCoord) -> Result<bool> {
        if self.registry.contains(coord) {
            return Ok(false);
        }
        match self.build_chunk(coord) {
            Ok(()) => {
                self.stats.total_built += 1;
                Ok(true)
            }
            Err(e) => {
                self.stats.failed_builds += 1;
                Err(e)
            }
        }
    }

    /// Dispose and remove a chunk; `false` if it was not resident
    pub fn unload_chunk(&mut self, coord: ChunkCoord) -> bool {
        let removed = self.dispose_chunk(coord);
        if removed {
            self.stats.total_unloaded += 1;
        }
        removed
    }

    /// Release records and drawable, then drop the registry entry
    fn dispose_chunk(&mut self, coord: ChunkCoord) -> bool {
        let Some(chunk) = self.registry.get_mut(coord) else {
            return false;
        };
        chunk.release();
        self.registry.remove(coord);
        log::debug!("unloaded chunk {}", coord);
        true
    }

    /// Dispose a resident chunk and build it again from the seed.
    ///
    /// Returns `Ok(false)` if the chunk was not resident. Discovery flags on
    /// its resources reset, since records are regenerated.
    pub fn reload(&mut self, coord: ChunkCoord) -> Result<bool> {
        if !self.unload_chunk(coord) {
            return Ok(false);
        }
        self.load_chunk(coord)
    }

    /// Dispose every resident chunk; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let coords: Vec<ChunkCoord> = self.registry.coords().collect();
        let mut count = 0;
        for coord in coords {
            if self.dispose_chunk(coord) {
                count += 1;
            }
        }
        self.stats.total_unloaded += count as u64;
        self.last_scan_pos = None;
        self.scan_pending = false;
        if count > 0 {
            log::info!("StreamingManager: disposed {} chunks", count);
        }
        count
    }

    // --- Queries ---

    pub fn is_resident(&self, coord: ChunkCoord) -> bool {
        self.registry.contains(coord)
    }

    pub fn resident_count(&self) -> usize {
        self.registry.len()
    }

    pub fn resident_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.registry.coords()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk<H::Drawable>> {
        self.registry.get(coord)
    }

    /// All resources of resident chunks
    pub fn resources(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.registry.iter().flat_map(|chunk| chunk.resources.iter())
    }

    /// Resident resources not hidden
    pub fn visible_resources(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.resources().filter(|r| r.visible)
    }

    /// Resident resources within `radius` (3D distance) of `point`
    pub fn resources_within(&self, point: Vec3, radius: f32) -> Vec<&ResourceRecord> {
        let size = self.chunk_size();
        // Chunks whose footprint cannot reach the sphere are skipped
        let reach = radius + size * std::f32::consts::FRAC_1_SQRT_2;
        let p = xz(point);

        self.registry
            .iter()
            .filter(|chunk| chunk.center_distance(p, size) <= reach)
            .flat_map(|chunk| chunk.resources.iter())
            .filter(|r| r.position.distance(point) <= radius)
            .collect()
    }

    /// Resident resource by id
    pub fn resource(&self, id: ResourceId) -> Option<&ResourceRecord> {
        self.registry.get(id.chunk)?.resources.iter().find(|r| r.id == id)
    }

    /// Make a hidden resource visible.
    ///
    /// Returns `true` if the flag changed; `false` if it was already visible
    /// or its chunk is not resident.
    pub fn discover_resource(&mut self, id: ResourceId) -> bool {
        self.registry
            .get_mut(id.chunk)
            .and_then(|chunk| chunk.resources.iter_mut().find(|r| r.id == id))
            .is_some_and(|r| r.discover())
    }

    /// Terrain height anywhere, loaded or not
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.pipeline.height_at(x, z)
    }

    /// Biome anywhere, loaded or not
    pub fn biome_at(&self, x: f32, z: f32) -> Biome {
        self.pipeline.biome_at(x, z)
    }

    pub fn stats(&self) -> StreamingStats {
        StreamingStats {
            resident_chunks: self.registry.len(),
            resident_resources: self.registry.iter().map(|c| c.resources.len()).sum(),
            resident_geometry_bytes: self.registry.iter().map(|c| c.geometry.memory_usage()).sum(),
            ..self.stats
        }
    }
}

impl<H: RenderHost> Drop for StreamingManager<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

fn xz(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}
