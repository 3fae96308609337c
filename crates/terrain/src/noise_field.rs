//! Seeded 2D noise used to pick land and water.
//!
//! The lattice cell is folded into two noise channels:
//!
//! ```text
//! u = x * 0.15 + seed * 0.1
//! v = z * 0.15 + y * 0.1 + seed * 0.2
//! ```
//!
//! Perlin output is remapped from `[-1, 1]` to `[0, 1]` and clamped, so any
//! threshold at or above `1.0` yields an all-water globe.

use glam::IVec3;
use noise::{NoiseFn, Perlin};

const CELL_SCALE: f64 = 0.15;
const HEIGHT_SCALE: f64 = 0.1;
const SEED_U: f64 = 0.1;
const SEED_V: f64 = 0.2;

/// Deterministic land noise for a given seed.
#[derive(Clone, Debug)]
pub struct LandNoise {
    perlin: Perlin,
    seed: i32,
}

impl LandNoise {
    pub fn new(seed: i32) -> Self {
        Self {
            perlin: Perlin::new(seed as u32),
            seed,
        }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// The two noise channels for a lattice cell.
    pub fn channels(&self, cell: IVec3) -> [f64; 2] {
        let seed = self.seed as f64;
        [
            cell.x as f64 * CELL_SCALE + seed * SEED_U,
            cell.z as f64 * CELL_SCALE + cell.y as f64 * HEIGHT_SCALE + seed * SEED_V,
        ]
    }

    /// Noise value in `[0, 1]` for a lattice cell.
    pub fn sample(&self, cell: IVec3) -> f32 {
        let raw = self.perlin.get(self.channels(cell));
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}
