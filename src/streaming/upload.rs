//! # GPU Upload Boundary
//!
//! The seam between this crate and the presentation layer. The streaming
//! controller hands finished mesh buffers across this trait and stores the
//! opaque handles it gets back, releasing each exactly once when its chunk
//! is evicted or re-meshed. Nothing on this side ever inspects a handle.
//!
//! Implementations are called only from the controlling thread, so a
//! graphics API whose resource creation is not thread-safe can sit directly
//! behind this trait.

use thiserror::Error;

use crate::meshing::ChunkMeshData;
use crate::voxels::ChunkCoord;

/// A failed mesh upload, reported by the boundary implementation.
///
/// Upload failures are not fatal: the controller logs them, keeps the chunk
/// dirty, and retries on a later tick.
#[derive(Debug, Clone, Error)]
#[error("mesh upload failed: {reason}")]
pub struct UploadError {
    /// Implementation-provided description of the failure.
    pub reason: String,
}

impl UploadError {
    /// Creates an error from any printable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        UploadError {
            reason: reason.into(),
        }
    }
}

/// Consumer of finished chunk meshes.
pub trait ChunkUploader {
    /// Opaque render resource handle, owned by the cache entry that stores
    /// it.
    type Handle;

    /// Converts a mesh into a render resource.
    ///
    /// # Arguments
    /// * `coord` - The chunk the mesh belongs to, for diagnostics.
    /// * `mesh` - The finished, non-empty mesh buffers.
    fn upload(&mut self, coord: ChunkCoord, mesh: &ChunkMeshData)
        -> Result<Self::Handle, UploadError>;

    /// Destroys a render resource. Called exactly once per handle.
    fn release(&mut self, handle: Self::Handle);
}
