use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

/// Dense index of a body in the live scene array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyIndex(pub usize);

/// One recorded `(date, position)` pair for a body.
///
/// `date` is the store's native key (e.g. `A.D. 2023-Jan-01 00:00:00.0000 TDB`)
/// and is compared by exact string equality on lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub date: String,
    pub position: Vec3,
}

impl Sample {
    pub fn new(date: impl Into<String>, position: Vec3) -> Self {
        Self {
            date: date.into(),
            position,
        }
    }
}

/// A body transform flattened for the host, read through a raw pointer.
/// Layout: position xyz, then rotation quaternion xyzw.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TransformRecord {
    pub px: f32,
    pub py: f32,
    pub pz: f32,
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
}

impl TransformRecord {
    pub const FLOATS: usize = 7;

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            px: position.x,
            py: position.y,
            pz: position.z,
            qx: rotation.x,
            qy: rotation.y,
            qz: rotation.z,
            qw: rotation.w,
        }
    }
}
