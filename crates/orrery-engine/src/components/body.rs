use glam::{Quat, Vec3};
use crate::api::types::{BodyIndex, TransformRecord};

/// Live transform of one body in the scene.
/// The engine only writes `pos` and `rotation`.
#[derive(Debug, Clone)]
pub struct BodyTransform {
    /// Dense scene index.
    pub index: BodyIndex,
    /// Display name, for hosts that label bodies.
    pub tag: String,
    /// Position in scene units.
    pub pos: Vec3,
    /// Display orientation.
    pub rotation: Quat,
}

impl BodyTransform {
    /// Create a body transform at the origin with no rotation.
    pub fn new(index: BodyIndex) -> Self {
        Self {
            index,
            tag: String::new(),
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    /// Flatten position and rotation for the host buffer.
    pub fn record(&self) -> TransformRecord {
        TransformRecord::new(self.pos, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_carries_position_and_rotation() {
        let mut body = BodyTransform::new(BodyIndex(2)).with_pos(Vec3::new(1.0, -2.0, 3.0));
        body.rotation = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
        let rec = body.record();
        assert_eq!((rec.px, rec.py, rec.pz), (1.0, -2.0, 3.0));
        assert_eq!((rec.qx, rec.qy, rec.qz, rec.qw), (body.rotation.x, body.rotation.y, body.rotation.z, body.rotation.w));
    }
}
