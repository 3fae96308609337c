//! wgpu render backend for the voxel globe.
//!
//! Draws one instanced cube per recorded primitive, parented under the globe
//! transform, from an orbit camera.
//!
//! # Invariants
//! - Renderer never mutates the globe.
//! - Camera motion is independent of globe rotation.
//! - Primitives without a material draw in the palette's default color.

mod camera;
mod gpu;
mod palette;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::WgpuRenderer;
pub use palette::MaterialPalette;
