//! # Terrain Generator
//!
//! Turns the noise field into per-column terrain heights by fractal
//! summation: `octaves` noise samples at frequencies growing by
//! `lacunarity` and amplitudes decaying by `persistence`, normalized by the
//! total amplitude and mapped onto `[0, world_max_height]`. A voxel is
//! solid when its world Y lies below its column's height, or below the
//! configured ground level when that rule is enabled.
//!
//! The generator is immutable after construction and `Send + Sync`; every
//! worker thread samples one shared instance during chunk generation.

use bitvec::prelude::BitVec;

use crate::config::{ConfigError, StreamingConfig};
use crate::voxels::{Chunk, ChunkCoord};

use super::noise::NoiseField;

/// Where column heights come from.
enum HeightSource {
    /// Fractal summation over a seeded noise field.
    Fractal {
        noise: NoiseField,
        scale: f64,
        octaves: u32,
        lacunarity: f64,
        persistence: f64,
        max_height: i32,
    },
    /// A constant height for every column. Used by tests and demos, in the
    /// same spirit as deterministic solid/checkerboard chunk patterns.
    Flat(i32),
}

/// Procedural heightmap terrain over a [`NoiseField`].
pub struct TerrainGenerator {
    source: HeightSource,
    /// When set, everything strictly below this world Y is solid.
    ground_level: Option<i32>,
}

impl TerrainGenerator {
    /// Builds a generator from a validated configuration.
    ///
    /// # Arguments
    /// * `config` - The streaming configuration; its noise parameters drive
    ///   the fractal sum.
    ///
    /// # Returns
    /// The generator, or the [`ConfigError`] that made the configuration
    /// unusable.
    pub fn new(config: &StreamingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(TerrainGenerator {
            source: HeightSource::Fractal {
                noise: NoiseField::new(config.seed),
                scale: config.noise_scale,
                octaves: config.octaves,
                lacunarity: config.lacunarity,
                persistence: config.persistence,
                max_height: config.world_max_height,
            },
            ground_level: config.ground_level,
        })
    }

    /// A generator where every column has the same height.
    ///
    /// # Arguments
    /// * `height` - World Y below which every voxel is solid.
    pub fn flat(height: i32) -> Self {
        TerrainGenerator {
            source: HeightSource::Flat(height),
            ground_level: None,
        }
    }

    /// Terrain height of the column at a world voxel column.
    ///
    /// # Arguments
    /// * `world_x`, `world_z` - World voxel coordinates of the column.
    ///
    /// # Returns
    /// The column height: voxels with `world_y < height` are solid. Always
    /// within `[0, world_max_height]` for fractal terrain.
    pub fn height_at(&self, world_x: i32, world_z: i32) -> i32 {
        match &self.source {
            HeightSource::Flat(height) => *height,
            HeightSource::Fractal {
                noise,
                scale,
                octaves,
                lacunarity,
                persistence,
                max_height,
            } => {
                let mut frequency = *scale;
                let mut amplitude = 1.0;
                let mut total_amplitude = 0.0;
                let mut sum = 0.0;

                for _ in 0..*octaves {
                    sum += amplitude
                        * noise.sample(world_x as f64 * frequency, world_z as f64 * frequency);
                    total_amplitude += amplitude;
                    frequency *= lacunarity;
                    amplitude *= persistence;
                }

                // Normalized sum is in [-1, 1]; map onto [0, max_height].
                let normalized = sum / total_amplitude;
                let height = ((normalized + 1.0) * 0.5 * f64::from(*max_height)) as i32;
                height.clamp(0, *max_height)
            }
        }
    }

    /// Whether the voxel at a world coordinate is solid.
    pub fn is_solid(&self, world_x: i32, world_y: i32, world_z: i32) -> bool {
        if let Some(ground) = self.ground_level {
            if world_y < ground {
                return true;
            }
        }
        world_y < self.height_at(world_x, world_z)
    }

    /// Populates a whole chunk, evaluating each column's height once.
    ///
    /// This is the body of a generation task: it allocates the chunk, fills
    /// it in bulk, and returns it dirty and ready for meshing.
    ///
    /// # Arguments
    /// * `coord` - The chunk's grid coordinate.
    /// * `size` - Chunk edge length in voxels.
    pub fn fill_chunk(&self, coord: ChunkCoord, size: usize) -> Chunk {
        let origin = coord.origin_voxel(size);
        let mut bits = BitVec::repeat(false, size * size * size);

        for z in 0..size {
            for x in 0..size {
                let height = self.height_at(origin.x + x as i32, origin.z + z as i32);
                for y in 0..size {
                    let world_y = origin.y + y as i32;
                    let solid = world_y < height
                        || self.ground_level.is_some_and(|ground| world_y < ground);
                    if solid {
                        bits.set(x + size * (y + size * z), true);
                    }
                }
            }
        }

        let mut chunk = Chunk::new(size);
        chunk.fill_from(bits);
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn fractal_config() -> StreamingConfig {
        StreamingConfig {
            seed: 7,
            noise_scale: 0.05,
            octaves: 4,
            world_max_height: 32,
            ..Default::default()
        }
    }

    #[test]
    fn heights_are_deterministic_and_bounded() {
        let config = fractal_config();
        let a = TerrainGenerator::new(&config).unwrap();
        let b = TerrainGenerator::new(&config).unwrap();

        for i in -50..50 {
            let x = i * 13;
            let z = i * -7;
            let height = a.height_at(x, z);
            assert_eq!(height, b.height_at(x, z));
            assert!((0..=config.world_max_height).contains(&height));
        }
    }

    #[test]
    fn solidity_splits_exactly_at_the_column_height() {
        let generator = TerrainGenerator::new(&fractal_config()).unwrap();

        for (x, z) in [(0, 0), (31, -14), (-200, 513)] {
            let height = generator.height_at(x, z);
            if height > 0 {
                assert!(generator.is_solid(x, height - 1, z));
            }
            assert!(!generator.is_solid(x, height, z));
            assert!(!generator.is_solid(x, height + 1, z));
        }
    }

    #[test]
    fn ground_level_overrides_the_height_field() {
        let config = StreamingConfig {
            ground_level: Some(5),
            ..fractal_config()
        };
        let generator = TerrainGenerator::new(&config).unwrap();

        // Below ground level everything is solid, whatever the noise says.
        for x in -20..20 {
            assert!(generator.is_solid(x, 4, 0));
            assert!(generator.is_solid(x, -100, 0));
        }
    }

    #[test]
    fn flat_generator_has_constant_height() {
        let generator = TerrainGenerator::flat(9);
        assert_eq!(generator.height_at(0, 0), 9);
        assert_eq!(generator.height_at(-1000, 4321), 9);
        assert!(generator.is_solid(3, 8, -3));
        assert!(!generator.is_solid(3, 9, -3));
    }

    #[test]
    fn filled_chunks_agree_with_point_queries() {
        let size = 8;
        let generator = TerrainGenerator::new(&fractal_config()).unwrap();

        for coord in [ChunkCoord::new(0, 0, 0), ChunkCoord::new(-2, 1, 3)] {
            let chunk = generator.fill_chunk(coord, size);
            assert!(chunk.is_dirty());

            let origin = coord.origin_voxel(size);
            for z in 0..size {
                for y in 0..size {
                    for x in 0..size {
                        let world = Point3::new(
                            origin.x + x as i32,
                            origin.y + y as i32,
                            origin.z + z as i32,
                        );
                        assert_eq!(
                            chunk.get(x, y, z),
                            generator.is_solid(world.x, world.y, world.z),
                            "mismatch at {world:?}"
                        );
                    }
                }
            }
        }
    }
}
