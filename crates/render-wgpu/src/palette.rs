use std::collections::BTreeMap;
use voxglobe_common::MaterialHandle;

/// Maps host material handles to flat colors.
///
/// The backend has no material system of its own; a handle that was never
/// registered, or an unset one, draws in `default_color`.
#[derive(Debug, Clone)]
pub struct MaterialPalette {
    colors: BTreeMap<MaterialHandle, [f32; 4]>,
    pub default_color: [f32; 4],
}

impl Default for MaterialPalette {
    fn default() -> Self {
        Self {
            colors: BTreeMap::new(),
            default_color: [0.7, 0.7, 0.7, 1.0],
        }
    }
}

impl MaterialPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: MaterialHandle, color: [f32; 4]) {
        self.colors.insert(handle, color);
    }

    pub fn color(&self, material: Option<MaterialHandle>) -> [f32; 4] {
        material
            .and_then(|h| self.colors.get(&h).copied())
            .unwrap_or(self.default_color)
    }
}
