//! # Chunk Coordinates
//!
//! Chunks are addressed on an integer grid in chunk space, not voxel space:
//! the chunk at coordinate `(1, 0, 0)` spans world voxels
//! `[chunk_size, 2 * chunk_size)` along X. `ChunkCoord` is the cache key for
//! the streaming controller and therefore hashable and totally comparable.

use cgmath::{Point3, Vector3};

use super::side::Side;

/// Position of a chunk on the chunk grid.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Debug)]
pub struct ChunkCoord {
    /// Chunk grid X.
    pub x: i32,
    /// Chunk grid Y.
    pub y: i32,
    /// Chunk grid Z.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a coordinate from its three components.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        ChunkCoord { x, y, z }
    }

    /// Maps a world-space position to the coordinate of the chunk that
    /// contains it.
    ///
    /// # Arguments
    /// * `position` - A point in world space, e.g. the observer position.
    /// * `chunk_extent` - World-space edge length of one chunk
    ///   (`chunk_size * voxel_spacing`), must be positive.
    pub fn from_world(position: Point3<f32>, chunk_extent: f32) -> Self {
        ChunkCoord {
            x: (position.x / chunk_extent).floor() as i32,
            y: (position.y / chunk_extent).floor() as i32,
            z: (position.z / chunk_extent).floor() as i32,
        }
    }

    /// Maps a world voxel coordinate to the coordinate of the owning chunk.
    ///
    /// Uses floored division so negative voxel coordinates land in the
    /// correct chunk.
    pub fn from_voxel(voxel: Point3<i32>, chunk_size: usize) -> Self {
        let size = chunk_size as i32;
        ChunkCoord {
            x: voxel.x.div_euclid(size),
            y: voxel.y.div_euclid(size),
            z: voxel.z.div_euclid(size),
        }
    }

    /// The coordinate of the face-adjacent neighbor in the given direction.
    pub fn neighbor(self, side: Side) -> Self {
        let n = side.normal();
        ChunkCoord {
            x: self.x + n.x,
            y: self.y + n.y,
            z: self.z + n.z,
        }
    }

    /// World voxel coordinate of this chunk's minimum corner.
    pub fn origin_voxel(self, chunk_size: usize) -> Point3<i32> {
        let size = chunk_size as i32;
        Point3::new(self.x * size, self.y * size, self.z * size)
    }

    /// World-space translation of this chunk's minimum corner, used as the
    /// render entry's model transform.
    ///
    /// # Returns
    /// `coordinate * chunk_size * voxel_spacing` per axis.
    pub fn translation(self, chunk_size: usize, voxel_spacing: f32) -> Vector3<f32> {
        let extent = chunk_size as f32 * voxel_spacing;
        Vector3::new(
            self.x as f32 * extent,
            self.y as f32 * extent,
            self.z as f32 * extent,
        )
    }

    /// Chebyshev distance to another coordinate, the metric of the cubic
    /// desired set.
    pub fn chebyshev_distance(self, other: ChunkCoord) -> i32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}
