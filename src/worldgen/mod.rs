//! # Procedural World Generation
//!
//! The deterministic content pipeline: a seeded 2-D gradient noise field and
//! the fractal terrain generator built on top of it. Both are immutable
//! after construction and shared across worker threads without locks.

pub mod noise;
pub mod terrain;

pub use noise::NoiseField;
pub use terrain::TerrainGenerator;
