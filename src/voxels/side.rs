//! # Face Directions
//!
//! The six axis-aligned face directions of a voxel. Used for face culling,
//! neighbor lookups across chunk borders, and as the normal of every emitted
//! mesh face.

use cgmath::Vector3;

/// One of the six faces of a voxel, named by the axis its outward normal
/// points along.
///
/// The discriminants are stable and used to index per-side arrays such as a
/// chunk's neighbor set.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Side {
    /// Negative X face.
    NegX = 0,
    /// Positive X face.
    PosX = 1,
    /// Negative Y face (bottom).
    NegY = 2,
    /// Positive Y face (top).
    PosY = 3,
    /// Negative Z face.
    NegZ = 4,
    /// Positive Z face.
    PosZ = 5,
}

impl Side {
    /// All six sides in discriminant order.
    pub fn all() -> [Side; 6] {
        [
            Side::NegX,
            Side::PosX,
            Side::NegY,
            Side::PosY,
            Side::NegZ,
            Side::PosZ,
        ]
    }

    /// The side's position in per-side arrays; equal to its discriminant.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit outward normal as integer components.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            Side::NegX => Vector3::new(-1, 0, 0),
            Side::PosX => Vector3::new(1, 0, 0),
            Side::NegY => Vector3::new(0, -1, 0),
            Side::PosY => Vector3::new(0, 1, 0),
            Side::NegZ => Vector3::new(0, 0, -1),
            Side::PosZ => Vector3::new(0, 0, 1),
        }
    }

    /// Unit outward normal as float components, for vertex data.
    pub fn normal_f32(self) -> Vector3<f32> {
        self.normal().cast::<f32>().expect("unit normal components fit in f32")
    }

    /// The face on the opposite side of the voxel.
    pub fn opposite(self) -> Side {
        match self {
            Side::NegX => Side::PosX,
            Side::PosX => Side::NegX,
            Side::NegY => Side::PosY,
            Side::PosY => Side::NegY,
            Side::NegZ => Side::PosZ,
            Side::PosZ => Side::NegZ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_discriminant_order() {
        for (i, side) in Side::all().into_iter().enumerate() {
            assert_eq!(side.index(), i);
        }
    }

    #[test]
    fn opposite_sides_have_opposite_normals() {
        for side in Side::all() {
            assert_eq!(side.normal(), -side.opposite().normal());
            assert_eq!(side.opposite().opposite(), side);
        }
    }
}
