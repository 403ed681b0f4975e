//! # Streaming Configuration
//!
//! All load-time constants for the streaming pipeline live in one immutable
//! `StreamingConfig` value that is passed explicitly to every component
//! constructor. Nothing in this crate reads process-wide globals, so the
//! noise field, terrain generator, and mesher stay independently testable.
//!
//! A configuration is validated once, up front. An invalid configuration is
//! fatal at construction and no partial state is created.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while validating or loading a [`StreamingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The chunk edge length must be at least one voxel.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// The stream radius must be at least one chunk.
    #[error("stream radius must be greater than zero (got {0})")]
    InvalidRadius(i32),

    /// The voxel-to-world spacing must be positive and finite.
    #[error("voxel spacing must be positive and finite (got {0})")]
    InvalidSpacing(f32),

    /// Fractal summation needs at least one octave.
    #[error("octave count must be at least one")]
    InvalidOctaves,

    /// Lacunarity and persistence must be positive.
    #[error("noise parameter {name} must be positive (got {value})")]
    InvalidNoiseParameter {
        /// Which parameter failed validation.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The worker pool needs at least one thread.
    #[error("worker thread count must be at least one")]
    NoWorkers,

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load-time constants for the chunk streaming pipeline.
///
/// Construct one (or load it from JSON with [`StreamingConfig::from_json_file`]),
/// then hand it to [`ChunkStreamer::new`](crate::streaming::ChunkStreamer::new).
/// The value is cheap to clone and never mutated after validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Chunk edge length in voxels. Every chunk owns `chunk_size³` voxels.
    pub chunk_size: usize,
    /// Streaming radius in chunks. The desired set is the cube of chunks
    /// within this Chebyshev distance of the observer's chunk coordinate.
    pub stream_radius: i32,
    /// World-space extent of a single voxel.
    pub voxel_spacing: f32,
    /// Seed for the noise permutation table.
    pub seed: u64,
    /// Base sampling frequency for the first noise octave.
    pub noise_scale: f64,
    /// Number of noise octaves summed per terrain column.
    pub octaves: u32,
    /// Per-octave frequency multiplier.
    pub lacunarity: f64,
    /// Per-octave amplitude multiplier.
    pub persistence: f64,
    /// Terrain height ceiling in voxels; column heights map into
    /// `[0, world_max_height]`.
    pub world_max_height: i32,
    /// When set, every voxel strictly below this world Y is solid
    /// regardless of the height field.
    pub ground_level: Option<i32>,
    /// Number of background worker threads for generation and meshing.
    pub worker_threads: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        StreamingConfig {
            chunk_size: 16,
            stream_radius: 4,
            voxel_spacing: 1.0,
            seed: 0,
            noise_scale: 0.01,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            world_max_height: 64,
            ground_level: None,
            worker_threads: 4,
        }
    }
}

impl StreamingConfig {
    /// Checks every constraint the pipeline relies on.
    ///
    /// # Returns
    /// `Ok(())` when the configuration is usable, or the first violated
    /// constraint as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize);
        }
        if self.stream_radius <= 0 {
            return Err(ConfigError::InvalidRadius(self.stream_radius));
        }
        if !(self.voxel_spacing.is_finite() && self.voxel_spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing(self.voxel_spacing));
        }
        if self.octaves == 0 {
            return Err(ConfigError::InvalidOctaves);
        }
        if !(self.noise_scale.is_finite() && self.noise_scale > 0.0) {
            return Err(ConfigError::InvalidNoiseParameter {
                name: "noise_scale",
                value: self.noise_scale,
            });
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 0.0) {
            return Err(ConfigError::InvalidNoiseParameter {
                name: "lacunarity",
                value: self.lacunarity,
            });
        }
        if !(self.persistence.is_finite() && self.persistence > 0.0) {
            return Err(ConfigError::InvalidNoiseParameter {
                name: "persistence",
                value: self.persistence,
            });
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }

    /// Loads and validates a configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to a JSON file with any subset of the config fields;
    ///   missing fields fall back to their defaults.
    ///
    /// # Returns
    /// The validated configuration, or a [`ConfigError`] describing the
    /// read, parse, or validation failure.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: StreamingConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// World-space edge length of one chunk (`chunk_size * voxel_spacing`).
    pub fn chunk_extent(&self) -> f32 {
        self.chunk_size as f32 * self.voxel_spacing
    }
}
