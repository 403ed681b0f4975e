//! Unit-quad corner templates for the six voxel faces.

use cgmath::Point3;

use crate::voxels::Side;

/// A single quad face of a voxel, described by its four corner lattice
/// points.
///
/// Corners are named lower-left, lower-right, upper-right, upper-left as
/// seen from outside the voxel, and every template winds counter-clockwise
/// around the outward normal so the two triangles `(0,1,2)` and `(0,2,3)`
/// are front-facing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner in voxel lattice coordinates.
    pub ll: Point3<i32>,
    /// Lower-right corner.
    pub lr: Point3<i32>,
    /// Upper-right corner.
    pub ur: Point3<i32>,
    /// Upper-left corner.
    pub ul: Point3<i32>,
    /// Which side of the voxel this face covers.
    pub side: Side,
}

impl Face {
    /// The face of the unit voxel at `(x, y, z)` on the given side.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - The voxel's minimum corner in lattice coordinates.
    /// * `side` - The face direction.
    pub fn unit(x: i32, y: i32, z: i32, side: Side) -> Self {
        match side {
            Side::PosX => Face {
                ll: Point3::new(x + 1, y, z + 1),
                lr: Point3::new(x + 1, y, z),
                ur: Point3::new(x + 1, y + 1, z),
                ul: Point3::new(x + 1, y + 1, z + 1),
                side,
            },
            Side::NegX => Face {
                ll: Point3::new(x, y, z),
                lr: Point3::new(x, y, z + 1),
                ur: Point3::new(x, y + 1, z + 1),
                ul: Point3::new(x, y + 1, z),
                side,
            },
            Side::PosY => Face {
                ll: Point3::new(x, y + 1, z + 1),
                lr: Point3::new(x + 1, y + 1, z + 1),
                ur: Point3::new(x + 1, y + 1, z),
                ul: Point3::new(x, y + 1, z),
                side,
            },
            Side::NegY => Face {
                ll: Point3::new(x, y, z),
                lr: Point3::new(x + 1, y, z),
                ur: Point3::new(x + 1, y, z + 1),
                ul: Point3::new(x, y, z + 1),
                side,
            },
            Side::PosZ => Face {
                ll: Point3::new(x, y, z + 1),
                lr: Point3::new(x + 1, y, z + 1),
                ur: Point3::new(x + 1, y + 1, z + 1),
                ul: Point3::new(x, y + 1, z + 1),
                side,
            },
            Side::NegZ => Face {
                ll: Point3::new(x + 1, y, z),
                lr: Point3::new(x, y, z),
                ur: Point3::new(x, y + 1, z),
                ul: Point3::new(x + 1, y + 1, z),
                side,
            },
        }
    }

    /// The four corners in emission order `[ll, lr, ur, ul]`.
    pub fn corners(&self) -> [Point3<i32>; 4] {
        [self.ll, self.lr, self.ur, self.ul]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    /// Normal implied by the first emitted triangle `(ll, lr, ur)`.
    fn triangle_normal(face: &Face) -> Vector3<i32> {
        let a = face.lr - face.ll;
        let b = face.ur - face.lr;
        a.cross(b)
    }

    #[test]
    fn templates_wind_counter_clockwise_around_the_outward_normal() {
        for side in Side::all() {
            let face = Face::unit(0, 0, 0, side);
            assert_eq!(
                triangle_normal(&face),
                side.normal(),
                "winding broken for {side:?}"
            );
        }
    }

    #[test]
    fn all_corners_lie_on_the_face_plane() {
        for side in Side::all() {
            let face = Face::unit(2, 3, 4, side);
            let normal = side.normal();
            for corner in face.corners() {
                // The face plane sits at the voxel minimum plus one along a
                // positive normal.
                let expected = match (normal.x, normal.y, normal.z) {
                    (1, 0, 0) => (corner.x, 3),
                    (-1, 0, 0) => (corner.x, 2),
                    (0, 1, 0) => (corner.y, 4),
                    (0, -1, 0) => (corner.y, 3),
                    (0, 0, 1) => (corner.z, 5),
                    _ => (corner.z, 4),
                };
                assert_eq!(expected.0, expected.1, "corner off plane for {side:?}");
            }
        }
    }
}
