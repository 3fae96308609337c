//! Globe tunables.
//!
//! Every field has a default matching the stock globe, so a config file only
//! needs to name the values it overrides.

use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pointer button that drives drag rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    #[default]
    Secondary,
    Middle,
}

/// Parameters of the voxel shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Lattice half-extent; the grid spans `[-resolution, resolution]` on each axis.
    pub resolution: i32,
    /// Outer radius of the shell in world units.
    pub radius: f32,
    pub noise_seed: i32,
    /// Cells whose noise value exceeds this become land.
    pub land_threshold: f32,
    /// World-space center the lattice is laid out around.
    pub center: Vec3,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 10,
            radius: 5.0,
            noise_seed: 42,
            land_threshold: 0.5,
            center: Vec3::ZERO,
        }
    }
}

impl TerrainConfig {
    /// Edge length of one voxel, `2 * radius / resolution`.
    ///
    /// Returns `None` when the lattice cannot produce any voxel.
    pub fn cube_size(&self) -> Option<f32> {
        if self.resolution <= 0 || !self.radius.is_finite() || self.radius <= 0.0 {
            return None;
        }
        Some(2.0 * self.radius / self.resolution as f32)
    }

    /// Number of lattice candidates visited by a full generation pass.
    pub fn lattice_len(&self) -> usize {
        if self.resolution <= 0 {
            return 0;
        }
        let side = 2 * self.resolution as usize + 1;
        side * side * side
    }
}

/// Rotation tuning. Spin vectors are rotation vectors in degrees per second:
/// the direction is the world-space axis, the length is the rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Degrees per second of target spin for each pixel of pointer travel in one tick.
    pub rotation_speed: f32,
    /// Seconds the post-release inertia takes to decay.
    pub inertia_duration: f32,
    /// Power-law exponent of the decay curve. Higher cuts off sharper near the end.
    pub inertia_damping: f32,
    /// Passive spin used until a decay has frozen its own direction.
    pub default_spin: Vec3,
    /// Per-tick interpolation factor toward the drag target, in (0, 1].
    pub lag_factor: f32,
    /// Remaining inertia time below which the decay is considered settled.
    pub settle_epsilon: f32,
    pub drag_button: PointerButton,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 60.0,
            inertia_duration: 1.5,
            inertia_damping: 2.5,
            default_spin: Vec3::ONE,
            lag_factor: 0.1,
            settle_epsilon: 0.05,
            drag_button: PointerButton::Secondary,
        }
    }
}

/// Complete globe configuration, supplied by the host before start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub terrain: TerrainConfig,
    pub spin: SpinConfig,
}

impl GlobeConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded globe config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_stock_globe() {
        let c = GlobeConfig::default();
        assert_eq!(c.terrain.resolution, 10);
        assert_eq!(c.terrain.radius, 5.0);
        assert_eq!(c.terrain.noise_seed, 42);
        assert_eq!(c.terrain.land_threshold, 0.5);
        assert_eq!(c.spin.inertia_duration, 1.5);
        assert_eq!(c.spin.inertia_damping, 2.5);
        assert_eq!(c.spin.drag_button, PointerButton::Secondary);
    }

    #[test]
    fn default_spin_is_scaled_diagonal() {
        let spin = SpinConfig::default().default_spin;
        let expected = Vec3::ONE.normalize() * 3.0_f32.sqrt();
        assert!((spin - expected).length() < 1e-6);
    }

    #[test]
    fn cube_size_degenerate_inputs() {
        let mut t = TerrainConfig::default();
        assert_eq!(t.cube_size(), Some(1.0));

        t.resolution = 0;
        assert_eq!(t.cube_size(), None);
        t.resolution = -3;
        assert_eq!(t.cube_size(), None);

        t.resolution = 4;
        t.radius = 0.0;
        assert_eq!(t.cube_size(), None);
        t.radius = f32::NAN;
        assert_eq!(t.cube_size(), None);
    }

    #[test]
    fn lattice_len_counts_inclusive_grid() {
        let mut t = TerrainConfig::default();
        t.resolution = 1;
        assert_eq!(t.lattice_len(), 27);
        t.resolution = 0;
        assert_eq!(t.lattice_len(), 0);
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "terrain": {{ "resolution": 4, "noise_seed": 7 }}, "spin": {{ "drag_button": "primary" }} }}"#
        )
        .unwrap();

        let c = GlobeConfig::load(file.path()).unwrap();
        assert_eq!(c.terrain.resolution, 4);
        assert_eq!(c.terrain.noise_seed, 7);
        assert_eq!(c.terrain.radius, 5.0);
        assert_eq!(c.spin.drag_button, PointerButton::Primary);
        assert_eq!(c.spin.lag_factor, 0.1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GlobeConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = GlobeConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
        assert!(err.to_string().contains("failed to parse config"));
    }
}
