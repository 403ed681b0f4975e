//! # Voxelstream Demo
//!
//! Headless driver for the streaming pipeline: flies an observer through
//! procedurally generated terrain with a logging upload boundary standing in
//! for a real renderer. Useful for watching the pipeline behave under
//! `RUST_LOG=debug` and for profiling generation and meshing throughput.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release [config.json]
//! ```

use std::time::Duration;

use cgmath::Point3;
use log::info;

use voxelstream::config::StreamingConfig;
use voxelstream::meshing::ChunkMeshData;
use voxelstream::streaming::{ChunkStreamer, ChunkUploader, UploadError};
use voxelstream::voxels::ChunkCoord;

/// Upload boundary that only counts what a renderer would receive.
#[derive(Default)]
struct LoggingUploader {
    next_handle: u64,
    live: u64,
    uploaded_vertices: u64,
}

impl ChunkUploader for LoggingUploader {
    type Handle = u64;

    fn upload(&mut self, coord: ChunkCoord, mesh: &ChunkMeshData) -> Result<u64, UploadError> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.live += 1;
        self.uploaded_vertices += mesh.vertices.len() as u64;
        log::debug!(
            "uploaded chunk {coord:?} as handle {handle} ({} vertices)",
            mesh.vertices.len()
        );
        Ok(handle)
    }

    fn release(&mut self, handle: u64) {
        self.live -= 1;
        log::debug!("released handle {handle}");
    }
}

fn main() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match StreamingConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("cannot load configuration from {path}: {error}");
                std::process::exit(1);
            }
        },
        None => StreamingConfig::default(),
    };

    let spacing = config.voxel_spacing;
    let mut streamer = match ChunkStreamer::new(config, LoggingUploader::default()) {
        Ok(streamer) => streamer,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            std::process::exit(1);
        }
    };

    // Fly forward at two voxels per tick and stream the world around us.
    let mut observer = Point3::new(0.0, 40.0 * spacing, 0.0);
    for tick in 0..240u32 {
        observer.x += 2.0 * spacing;
        streamer.update(observer);

        if tick % 30 == 0 {
            info!(
                "tick {tick}: {} cached, {} generating, {} meshing, {} drawable",
                streamer.chunk_count(),
                streamer.generating_count(),
                streamer.meshing_count(),
                streamer.render_entries().count()
            );
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    // Let the pipeline drain so the final numbers are comparable run to run.
    while !streamer.is_idle() {
        streamer.update(observer);
        std::thread::sleep(Duration::from_millis(1));
    }

    info!(
        "done: {} chunks cached, {} drawable, {} live handles, {} vertices uploaded in total",
        streamer.chunk_count(),
        streamer.render_entries().count(),
        streamer.uploader().live,
        streamer.uploader().uploaded_vertices
    );
}
