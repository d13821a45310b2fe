//! Streaming configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::generation::GenerationConfig;

/// Configuration for the chunk streaming manager
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Terrain, mesh and resource generation settings
    pub generation: GenerationConfig,
    /// Chebyshev radius (in chunks) around the viewpoint chunk that is kept built
    pub load_radius: u32,
    /// Chunks whose center is farther than `unload_radius * chunk_size` are dropped.
    /// Must exceed the farthest load-square corner, see
    /// [`radii_are_consistent`](Self::radii_are_consistent).
    pub unload_radius: f32,
    /// Viewpoint movement (world units) required before the next scan
    pub rescan_threshold: f32,
    /// Cap on chunks built per tick, nearest first; `None` builds everything
    pub max_builds_per_tick: Option<usize>,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            load_radius: 3,
            unload_radius: 5.0,
            rescan_threshold: 8.0,
            max_builds_per_tick: None,
        }
    }
}

impl StreamingConfig {
    /// Create a config with custom radii
    pub fn with_radii(load_radius: u32, unload_radius: f32) -> Self {
        Self {
            load_radius,
            unload_radius,
            ..Default::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    ///
    /// The unload/load radius contract is not checked here; see
    /// [`radii_are_consistent`](Self::radii_are_consistent).
    pub fn validate(&self) -> Result<()> {
        self.generation.validate()?;
        if self.unload_radius.is_nan() || self.unload_radius <= 0.0 {
            return Err(Error::Config(format!("unload_radius must be positive, got {}", self.unload_radius)));
        }
        if self.rescan_threshold.is_nan() || self.rescan_threshold < 0.0 {
            return Err(Error::Config(format!(
                "rescan_threshold must be >= 0, got {}",
                self.rescan_threshold
            )));
        }
        if self.max_builds_per_tick == Some(0) {
            return Err(Error::Config("max_builds_per_tick must be at least 1 when set".into()));
        }
        Ok(())
    }

    /// Distance (in chunks) from a viewpoint to the farthest chunk center of
    /// its load square: a corner chunk seen from the opposite corner of the
    /// viewpoint chunk.
    pub fn max_load_distance(&self) -> f32 {
        std::f32::consts::SQRT_2 * (self.load_radius as f32 + 0.5)
    }

    /// Whether every chunk the load step builds lies inside the unload radius
    /// from any viewpoint position within its chunk
    pub fn radii_are_consistent(&self) -> bool {
        self.unload_radius > self.max_load_distance()
    }

    pub fn chunk_size(&self) -> f32 {
        self.generation.chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = StreamingConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.radii_are_consistent());
        assert_eq!(config.chunk_size(), 64.0);
    }

    #[test]
    fn test_with_radii() {
        let config = StreamingConfig::with_radii(2, 4.0);
        assert_eq!(config.load_radius, 2);
        assert_eq!(config.unload_radius, 4.0);
        assert!(!StreamingConfig::with_radii(3, 3.0).radii_are_consistent());
    }

    #[test]
    fn test_radii_consistency_covers_load_corners() {
        // Chebyshev radius 2 reaches corner centers 2.5 * sqrt(2) chunks away
        assert!(!StreamingConfig::with_radii(2, 3.0).radii_are_consistent());
        assert!(!StreamingConfig::with_radii(2, 3.5).radii_are_consistent());
        assert!(StreamingConfig::with_radii(2, 3.6).radii_are_consistent());
        assert!(StreamingConfig::with_radii(0, 0.75).radii_are_consistent());
        assert!((StreamingConfig::with_radii(1, 3.0).max_load_distance() - 2.1213).abs() < 1e-3);
    }

    #[test]
    fn test_from_json_partial() {
        let config = StreamingConfig::from_json_str(
            r#"{ "load_radius": 1, "unload_radius": 3.0, "generation": { "seed": 7, "resolution": 4 } }"#,
        )
        .unwrap();
        assert_eq!(config.load_radius, 1);
        assert_eq!(config.generation.seed, 7);
        assert_eq!(config.generation.resolution, 4);
        assert_eq!(config.generation.chunk_size, 64.0);
        assert_eq!(config.rescan_threshold, StreamingConfig::default().rescan_threshold);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(StreamingConfig::from_json_str("{ not json"), Err(Error::Json(_))));
        assert!(matches!(
            StreamingConfig::from_json_str(r#"{ "generation": { "resolution": 0 } }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            StreamingConfig::from_json_str(r#"{ "max_builds_per_tick": 0 }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = StreamingConfig::with_radii(2, 4.5);
        config.max_builds_per_tick = Some(3);
        let json = config.to_json().unwrap();
        assert_eq!(StreamingConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "load_radius": 4, "unload_radius": 6.5 }}"#).unwrap();

        let config = StreamingConfig::load(file.path()).unwrap();
        assert_eq!(config.load_radius, 4);
        assert_eq!(config.unload_radius, 6.5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = StreamingConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
