//! Shared types and configuration for the voxel globe workspace.
//!
//! # Invariants
//! - Configuration is immutable once handed to a `Globe`.
//! - Degenerate values are accepted here; consumers degrade gracefully.

pub mod cli;
pub mod config;
pub mod error;
pub mod types;

pub use cli::ConfigArgs;
pub use config::{GlobeConfig, PointerButton, SpinConfig, TerrainConfig};
pub use error::ConfigError;
pub use types::{MaterialHandle, SurfaceMaterials, Transform};
