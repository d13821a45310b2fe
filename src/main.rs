//! Headless streaming walk - drives the streaming manager along a straight
//! path and reports what was built, unloaded and placed.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   JSON streaming config (missing fields take defaults)
//!   --seed <SEED>     Override the world seed
//!   --steps <N>       Number of ticks to simulate (default: 64)
//!   --step <METERS>   Viewpoint movement per tick along +X (default: 16.0)
//!   --load <CHUNKS>   Override the load radius
//!   --unload <CHUNKS> Override the unload radius

use std::time::Instant;

use glam::Vec3;

use terrastream::core::{Result, logging};
use terrastream::streaming::{NullHost, StreamingConfig, StreamingManager};
use terrastream::terrain::coords::ChunkCoord;

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => StreamingConfig::load(&path)?,
        None => StreamingConfig::default(),
    };
    if let Some(seed) = parse_u32_arg(&args, "--seed") {
        config.generation.seed = seed;
    }
    if let Some(load) = parse_u32_arg(&args, "--load") {
        config.load_radius = load;
    }
    if let Some(unload) = parse_f32_arg(&args, "--unload") {
        config.unload_radius = unload;
    }
    config.validate()?;

    let steps = parse_usize_arg(&args, "--steps").unwrap_or(64);
    let step = parse_f32_arg(&args, "--step").unwrap_or(16.0);

    println!("=== Terrastream Walk ===");
    println!("Seed:   {}", config.generation.seed);
    println!("Chunk:  {}m, resolution {}", config.chunk_size(), config.generation.resolution);
    println!("Radii:  load {}, unload {}", config.load_radius, config.unload_radius);
    println!("Walk:   {} steps of {}m", steps, step);
    println!();

    let chunk_size = config.chunk_size();
    let mut manager = StreamingManager::new(config, NullHost);
    let start = Instant::now();

    for tick in 0..steps {
        let x = tick as f32 * step;
        let y = manager.height_at(x, 0.0);
        let viewpoint = Vec3::new(x, y, 0.0);
        let report = manager.update(&viewpoint);

        if report.changed() {
            log::info!(
                "tick {} at chunk {} ({}): +{} -{} chunks ({} resident)",
                tick,
                ChunkCoord::from_world_pos(viewpoint, chunk_size),
                manager.biome_at(x, 0.0).name(),
                report.built,
                report.unloaded,
                manager.resident_count()
            );
        }
    }

    let elapsed = start.elapsed();
    let stats = manager.stats();
    let visible = manager.visible_resources().count();

    println!();
    println!("=== Summary ===");
    println!("Scans:      {}", stats.scans);
    println!("Built:      {}", stats.total_built);
    println!("Unloaded:   {}", stats.total_unloaded);
    println!("Failed:     {}", stats.failed_builds);
    println!(
        "Resident:   {} chunks, {:.1} KiB geometry",
        stats.resident_chunks,
        stats.resident_geometry_bytes as f64 / 1024.0
    );
    println!(
        "Resources:  {} ({} visible, {} hidden)",
        stats.resident_resources,
        visible,
        stats.resident_resources - visible
    );
    println!("Time:       {:.2?}", elapsed);

    Ok(())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
