use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque handle to a host-owned material. The globe never manages its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(pub u64);

/// The two material handles a globe paints with.
///
/// Either may be absent; primitives created without a material keep the
/// backend's default appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceMaterials {
    pub land: Option<MaterialHandle>,
    pub water: Option<MaterialHandle>,
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Apply `delta` in world space on top of the current orientation.
    ///
    /// The result is renormalized so that long-running accumulation does not
    /// drift away from a unit quaternion.
    pub fn rotate_world(&mut self, delta: Quat) {
        self.rotation = (delta * self.rotation).normalize();
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
