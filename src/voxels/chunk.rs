//! # Chunk
//!
//! A chunk owns a fixed-size cubic grid of solid/empty voxels plus a dirty
//! flag. It is the unit of streaming: created empty when its coordinate
//! enters the desired set, bulk-populated once by the terrain generator,
//! mutated afterwards only by explicit voxel edits, and dropped on eviction.
//!
//! ## Storage
//!
//! Voxels are one bit each in a [`BitVec`], row-major (`x`, then `y`, then
//! `z`), exactly `size³` bits. A 32-voxel chunk is 4 KiB, which keeps the
//! per-task neighborhood snapshots cheap to clone.
//!
//! ## Concurrency
//!
//! A chunk has no synchronization of its own. The streaming controller owns
//! every resident chunk and is the only mutator; worker tasks only ever see
//! cloned snapshots.

use bitvec::prelude::BitVec;

/// A cubic grid of boolean voxels with a dirty flag.
///
/// `dirty == true` means the mesh derived from this chunk is stale or has
/// never been built.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Edge length in voxels.
    size: usize,
    /// `size³` solid bits in row-major order.
    voxels: BitVec,
    /// Whether the derived mesh is stale.
    dirty: bool,
}

impl Chunk {
    /// Creates a chunk with every voxel empty and the dirty flag set.
    ///
    /// # Arguments
    /// * `size` - Edge length in voxels.
    ///
    /// # Panics
    /// Panics if `size` is zero. A zero chunk size is rejected as a
    /// configuration error long before any chunk is built, so reaching this
    /// with zero is a programming error.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "chunk size must be greater than zero");
        let voxel_count = size * size * size;
        Chunk {
            size,
            voxels: BitVec::repeat(false, voxel_count),
            dirty: true,
        }
    }

    /// Edge length in voxels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of voxels (`size³`).
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Flat index of a local coordinate.
    ///
    /// # Panics
    /// Panics when any coordinate is outside `[0, size)`. Out-of-range
    /// access never wraps or clamps; cross-border reads belong to
    /// [`VoxelView`](super::view::VoxelView).
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < self.size && y < self.size && z < self.size,
            "voxel coordinate ({x}, {y}, {z}) outside chunk of size {}",
            self.size
        );
        x + self.size * (y + self.size * z)
    }

    /// Whether the voxel at a local coordinate is solid.
    ///
    /// # Panics
    /// Panics when any coordinate is outside `[0, size)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.voxels[self.index(x, y, z)]
    }

    /// Sets one voxel and marks the chunk dirty.
    ///
    /// # Panics
    /// Panics when any coordinate is outside `[0, size)`.
    pub fn set(&mut self, x: usize, y: usize, z: usize, solid: bool) {
        let index = self.index(x, y, z);
        self.voxels.set(index, solid);
        self.dirty = true;
    }

    /// Bulk-replaces the entire voxel grid and marks the chunk dirty.
    ///
    /// # Arguments
    /// * `voxels` - Exactly `size³` bits in this chunk's row-major layout.
    ///
    /// # Panics
    /// Panics when the bit count does not match `size³`.
    pub fn fill_from(&mut self, voxels: BitVec) {
        assert_eq!(
            voxels.len(),
            self.voxel_count(),
            "bulk voxel data length does not match chunk volume"
        );
        self.voxels = voxels;
        self.dirty = true;
    }

    /// Whether the derived mesh is stale or missing.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the derived mesh stale.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Records that the current voxel content has been meshed.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
