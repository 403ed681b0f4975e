#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxelstream
//!
//! A headless chunk-streaming core for voxel worlds: it decides which
//! fixed-size cubic chunks must exist around a moving observer, generates
//! their voxel content procedurally, bakes exposed faces into triangle
//! meshes with per-vertex ambient occlusion, and hands the finished buffers
//! to a presentation layer through an opaque upload boundary.
//!
//! ## Key Modules
//!
//! * `config` - Load-time constants as one validated, immutable object
//! * `worldgen` - Seeded gradient noise and the fractal terrain generator
//! * `voxels` - Chunk coordinates, the chunk voxel grid, boundary-aware views
//! * `meshing` - The face baker: culling, UVs, normals, ambient occlusion
//! * `executor` - Worker-thread pool with future-based task results
//! * `streaming` - The controller tying cache, tasks, and uploads together
//!
//! ## Architecture
//!
//! One controlling thread owns the chunk cache and the GPU boundary and
//! calls [`ChunkStreamer::update`](streaming::ChunkStreamer::update) once
//! per tick. Worker threads run generation and meshing closures on owned
//! data and report back through one-shot futures drained by the next tick.
//! Windowing, cameras, and draw submission live outside this crate, behind
//! [`ChunkUploader`](streaming::ChunkUploader).
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Point3;
//! use voxelstream::config::StreamingConfig;
//! use voxelstream::streaming::ChunkStreamer;
//! # use voxelstream::streaming::{ChunkUploader, UploadError};
//! # use voxelstream::meshing::ChunkMeshData;
//! # use voxelstream::voxels::ChunkCoord;
//! # struct MyUploader;
//! # impl ChunkUploader for MyUploader {
//! #     type Handle = u32;
//! #     fn upload(&mut self, _: ChunkCoord, _: &ChunkMeshData) -> Result<u32, UploadError> { Ok(0) }
//! #     fn release(&mut self, _: u32) {}
//! # }
//!
//! let config = StreamingConfig::default();
//! let mut streamer = ChunkStreamer::new(config, MyUploader)?;
//!
//! // Per frame, on the render thread:
//! streamer.update(Point3::new(0.0, 24.0, 0.0));
//! for (_coord, _entry) in streamer.render_entries() {
//!     // draw _entry.handle with _entry.transform
//! }
//! # Ok::<(), voxelstream::config::ConfigError>(())
//! ```

pub mod config;
pub mod executor;
pub mod meshing;
pub mod streaming;
pub mod voxels;
pub mod worldgen;

pub use config::StreamingConfig;
pub use streaming::{ChunkStreamer, ChunkUploader, RenderEntry};
