//! # Face Baker
//!
//! Turns a chunk's voxel content into a renderable triangle mesh. The
//! technique is cube-per-voxel: every solid voxel contributes up to six
//! unit quads, one per face whose far side is not solid (face culling,
//! resolved through a [`VoxelView`] so culling works across chunk borders).
//!
//! Each emitted quad carries per-vertex position, UV, the face normal, and
//! a four-level ambient occlusion value derived from the three voxels that
//! crowd the vertex on the face plane. Index emission is two
//! counter-clockwise triangles per quad, `(0,1,2)` and `(0,2,3)`, with
//! indices offset by the running vertex count so meshes stay valid if they
//! are ever concatenated.
//!
//! The baker is a pure function over its inputs. Every meshing task calls
//! it exactly once with that task's snapshot; there is no shared state.

pub mod face;
pub mod vertex;

pub use face::Face;
pub use vertex::MeshVertex;

use cgmath::Point3;

use crate::voxels::{Side, VoxelView};

/// Quarter-turn rotation applied to a face's UV square.
///
/// Reserved for texture-atlas variation; the default applies no rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UvRotation {
    /// No rotation.
    #[default]
    None,
    /// 90 degrees.
    Quarter,
    /// 180 degrees.
    Half,
    /// 270 degrees.
    ThreeQuarter,
}

/// Per-bake options for UV assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshSettings {
    /// Rotation of the UV square on every face.
    pub uv_rotation: UvRotation,
    /// Mirror the U coordinate on every face.
    pub flip_u: bool,
}

impl MeshSettings {
    /// UV coordinates for the corners `[ll, lr, ur, ul]` after rotation and
    /// flip.
    fn corner_uvs(&self) -> [[f32; 2]; 4] {
        // V runs top to bottom: the upper corners get v = 0.
        const BASE: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

        let shift = match self.uv_rotation {
            UvRotation::None => 0,
            UvRotation::Quarter => 1,
            UvRotation::Half => 2,
            UvRotation::ThreeQuarter => 3,
        };

        let mut uvs = [[0.0; 2]; 4];
        for (corner, uv) in uvs.iter_mut().enumerate() {
            let mut assigned = BASE[(corner + shift) % 4];
            if self.flip_u {
                assigned[0] = 1.0 - assigned[0];
            }
            *uv = assigned;
        }
        uvs
    }
}

/// A finished chunk mesh: vertices plus triangle indices.
///
/// Produced fresh per meshing pass and immutable afterwards; the producing
/// task owns it until it is handed to the upload boundary.
#[derive(Debug, Clone, Default)]
pub struct ChunkMeshData {
    /// All face vertices, four per emitted quad.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices, six per emitted quad.
    pub indices: Vec<u32>,
}

impl ChunkMeshData {
    /// Number of emitted quads.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh has no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Bakes the mesh for the view's home chunk.
///
/// # Arguments
/// * `view` - Boundary-aware access to the chunk and its loaded neighbors.
/// * `settings` - UV options; `MeshSettings::default()` for plain faces.
///
/// # Returns
/// The mesh for every exposed face of the home chunk. Fully buried or fully
/// empty chunks produce an empty mesh.
pub fn build_chunk_mesh(view: &VoxelView<'_>, settings: &MeshSettings) -> ChunkMeshData {
    let size = view.size() as i32;
    let uvs = settings.corner_uvs();
    let mut mesh = ChunkMeshData::default();

    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                if !view.is_solid(x, y, z) {
                    continue;
                }

                for side in Side::all() {
                    let normal = side.normal();
                    if view.is_solid(x + normal.x, y + normal.y, z + normal.z) {
                        continue;
                    }
                    emit_face(&mut mesh, view, Point3::new(x, y, z), side, &uvs);
                }
            }
        }
    }

    log::trace!(
        "baked {} faces ({} vertices)",
        mesh.face_count(),
        mesh.vertices.len()
    );
    mesh
}

/// Appends one quad for the given voxel face.
fn emit_face(
    mesh: &mut ChunkMeshData,
    view: &VoxelView<'_>,
    voxel: Point3<i32>,
    side: Side,
    uvs: &[[f32; 2]; 4],
) {
    let face = Face::unit(voxel.x, voxel.y, voxel.z, side);
    let normal = side.normal_f32();
    let base = mesh.vertices.len() as u32;

    for (corner, uv) in face.corners().into_iter().zip(uvs) {
        let ao = vertex_ao(view, voxel, side, corner);
        mesh.vertices.push(MeshVertex::new(corner, *uv, normal, ao));
    }

    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Ambient occlusion level for one face corner.
///
/// Samples the two edge-adjacent voxels and the one corner-adjacent voxel
/// that touch the corner on the face plane (one step along the face
/// normal): 3 minus the number of solid samples, so three solid neighbors
/// give 0 (darkest) and none give 3 (brightest).
fn vertex_ao(view: &VoxelView<'_>, voxel: Point3<i32>, side: Side, corner: Point3<i32>) -> u8 {
    let voxel = [voxel.x, voxel.y, voxel.z];
    let corner = [corner.x, corner.y, corner.z];
    let normal = side.normal();
    let normal = [normal.x, normal.y, normal.z];

    // Cell one step out along the face normal, shared by all three samples.
    let above = [
        voxel[0] + normal[0],
        voxel[1] + normal[1],
        voxel[2] + normal[2],
    ];

    // The two axes tangent to the face, and the corner's direction on each:
    // a corner at the voxel minimum pulls samples from -1, at the maximum
    // from +1.
    let (t1, t2) = if normal[0] != 0 {
        (1, 2)
    } else if normal[1] != 0 {
        (0, 2)
    } else {
        (0, 1)
    };
    let step = |axis: usize| if corner[axis] > voxel[axis] { 1 } else { -1 };

    let mut solid = 0;
    let mut edge1 = above;
    edge1[t1] += step(t1);
    let mut edge2 = above;
    edge2[t2] += step(t2);
    let mut diagonal = above;
    diagonal[t1] += step(t1);
    diagonal[t2] += step(t2);

    for sample in [edge1, edge2, diagonal] {
        if view.is_solid(sample[0], sample[1], sample[2]) {
            solid += 1;
        }
    }

    3 - solid
}
