//! Vertex layout for chunk meshes.

use cgmath::{Point3, Vector3};

/// One vertex of a chunk mesh, laid out for direct GPU upload.
///
/// # Memory Layout
/// - Position: `[f32; 3]` (12 bytes)
/// - UV: `[f32; 2]` (8 bytes)
/// - Normal: `[f32; 3]` (12 bytes)
/// - Ambient occlusion level: `f32` (4 bytes)
///
/// Total size: 36 bytes, no padding, so a vertex buffer is
/// `bytemuck::cast_slice`-able by the presentation layer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in chunk-local space (voxel units).
    pub position: [f32; 3],
    /// Texture coordinates in the unit square.
    pub uv: [f32; 2],
    /// Outward face normal.
    pub normal: [f32; 3],
    /// Ambient occlusion level in `{0, 1, 2, 3}`; 3 is fully lit.
    pub ao: f32,
}

impl MeshVertex {
    /// Creates a vertex from lattice-space inputs.
    ///
    /// # Arguments
    /// * `position` - Corner position on the voxel lattice.
    /// * `uv` - Texture coordinates for this corner.
    /// * `normal` - Outward normal of the face this vertex belongs to.
    /// * `ao` - Ambient occlusion level, `0..=3`.
    pub fn new(position: Point3<i32>, uv: [f32; 2], normal: Vector3<f32>, ao: u8) -> Self {
        MeshVertex {
            position: [position.x as f32, position.y as f32, position.z as f32],
            uv,
            normal: normal.into(),
            ao: f32::from(ao),
        }
    }
}
