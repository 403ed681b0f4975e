//! # Voxel Data Model
//!
//! The spatial core of the crate: chunk-grid coordinates, face directions,
//! the chunk voxel grid itself, and the boundary-aware views used by the
//! mesher to read across chunk borders.

pub mod chunk;
pub mod coord;
pub mod side;
pub mod view;

pub use chunk::Chunk;
pub use coord::ChunkCoord;
pub use side::Side;
pub use view::{NeighborhoodSnapshot, VoxelView};
