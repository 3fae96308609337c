use glam::{Mat4, Vec3};
use voxglobe_common::MaterialHandle;
use voxglobe_kernel::{PrimitiveFactory, PrimitiveHandle};

/// One cube recorded by a [`PrimitiveList`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub handle: PrimitiveHandle,
    /// Center in the globe's local frame.
    pub position: Vec3,
    pub size: f32,
    pub material: Option<MaterialHandle>,
}

impl Primitive {
    /// Model matrix with the globe's transform as parent.
    pub fn model(&self, parent: Mat4) -> Mat4 {
        parent * Mat4::from_scale_rotation_translation(
            Vec3::splat(self.size),
            glam::Quat::IDENTITY,
            self.position,
        )
    }
}

/// Backend-neutral primitive store.
///
/// Implements [`PrimitiveFactory`] by recording every cube; render backends
/// draw whatever the list currently holds. `generation` increments on every
/// `destroy_all`, so backends can tell when to rebuild cached buffers.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveList {
    primitives: Vec<Primitive>,
    next_handle: u64,
    generation: u64,
}

impl PrimitiveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, handle: PrimitiveHandle) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.handle == handle)
    }

    /// Count of primitives drawn with `material`; `None` counts unset ones.
    pub fn count_with(&self, material: Option<MaterialHandle>) -> usize {
        self.primitives
            .iter()
            .filter(|p| p.material == material)
            .count()
    }
}

impl PrimitiveFactory for PrimitiveList {
    fn create_primitive(
        &mut self,
        position: Vec3,
        size: f32,
        material: Option<MaterialHandle>,
    ) -> PrimitiveHandle {
        let handle = PrimitiveHandle(self.next_handle);
        self.next_handle += 1;
        self.primitives.push(Primitive {
            handle,
            position,
            size,
            material,
        });
        handle
    }

    fn destroy_all(&mut self) {
        tracing::trace!(count = self.primitives.len(), "destroying primitives");
        self.primitives.clear();
        self.generation += 1;
    }
}
