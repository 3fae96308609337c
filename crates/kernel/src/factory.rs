use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxglobe_common::MaterialHandle;

/// Handle to a renderable primitive created by a [`PrimitiveFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrimitiveHandle(pub u64);

/// Host capability for creating the globe's cubes.
///
/// Primitives are children of the globe: `position` is in the globe's local
/// frame and the host composes it with the globe transform when drawing.
/// A `None` material means the host's default appearance.
pub trait PrimitiveFactory {
    /// Create one cube of edge `size` centered at `position`.
    fn create_primitive(
        &mut self,
        position: Vec3,
        size: f32,
        material: Option<MaterialHandle>,
    ) -> PrimitiveHandle;

    /// Destroy every primitive previously created for the globe.
    fn destroy_all(&mut self);
}
