//! Terrain: voxel shell generation with noise-driven land/water classification.
//!
//! # Invariants
//! - Output is a pure function of the `TerrainConfig`.
//! - Every voxel lies within `[radius - cube_size, radius]` of the center.
//! - Degenerate configurations yield an empty shell, never a panic.

mod generator;
mod noise_field;
mod voxel;

pub use generator::{TerrainGenerator, generate};
pub use noise_field::LandNoise;
pub use voxel::{Surface, Voxel};
