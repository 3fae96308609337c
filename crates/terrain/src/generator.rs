use crate::noise_field::LandNoise;
use crate::voxel::{Surface, Voxel};
use glam::IVec3;
use voxglobe_common::TerrainConfig;

/// Builds the voxel shell for one `TerrainConfig`.
///
/// Walks every cell of the `[-resolution, resolution]^3` lattice, keeps the
/// cells whose distance to the center falls within one cube of the radius,
/// and classifies each survivor through [`LandNoise`].
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: TerrainConfig,
    noise: LandNoise,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        Self {
            noise: LandNoise::new(config.noise_seed),
            config,
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Whether a cell at `distance` from the center belongs to the shell.
    pub fn in_shell(&self, distance: f32, cube_size: f32) -> bool {
        distance <= self.config.radius && distance >= self.config.radius - cube_size
    }

    /// Classify a single lattice cell.
    pub fn classify(&self, cell: IVec3) -> Surface {
        Surface::classify(self.noise.sample(cell), self.config.land_threshold)
    }

    /// Generate the full shell. Deterministic for a fixed config.
    pub fn generate(&self) -> Vec<Voxel> {
        let _span = tracing::info_span!(
            "generate",
            resolution = self.config.resolution,
            radius = self.config.radius,
            seed = self.config.noise_seed
        )
        .entered();

        let Some(cube_size) = self.config.cube_size() else {
            tracing::warn!(
                resolution = self.config.resolution,
                radius = self.config.radius,
                "degenerate terrain config, generating an empty shell"
            );
            return Vec::new();
        };

        let r = self.config.resolution;
        let center = self.config.center;
        let mut voxels = Vec::new();

        for x in -r..=r {
            for y in -r..=r {
                for z in -r..=r {
                    let cell = IVec3::new(x, y, z);
                    let offset = cell.as_vec3() * cube_size;
                    if !self.in_shell(offset.length(), cube_size) {
                        continue;
                    }
                    voxels.push(Voxel {
                        cell,
                        position: offset + center,
                        size: cube_size,
                        surface: self.classify(cell),
                    });
                }
            }
        }

        let land = voxels.iter().filter(|v| v.surface.is_land()).count();
        tracing::debug!(
            voxels = voxels.len(),
            land,
            water = voxels.len() - land,
            cube_size,
            "shell generated"
        );
        voxels
    }
}

/// Generate the voxel shell for `config`.
pub fn generate(config: &TerrainConfig) -> Vec<Voxel> {
    TerrainGenerator::new(*config).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn config(resolution: i32, radius: f32, seed: i32, threshold: f32) -> TerrainConfig {
        TerrainConfig {
            resolution,
            radius,
            noise_seed: seed,
            land_threshold: threshold,
            center: Vec3::ZERO,
        }
    }

    fn land_count(voxels: &[Voxel]) -> usize {
        voxels.iter().filter(|v| v.surface.is_land()).count()
    }

    #[test]
    fn generation_is_deterministic() {
        let c = config(6, 3.0, 42, 0.5);
        assert_eq!(generate(&c), generate(&c));
    }

    #[test]
    fn voxels_lie_in_shell() {
        let c = TerrainConfig {
            center: Vec3::new(10.0, -4.0, 2.5),
            ..config(8, 5.0, 3, 0.5)
        };
        let cube = c.cube_size().unwrap();
        let voxels = generate(&c);
        assert!(!voxels.is_empty());
        for v in &voxels {
            let d = v.position.distance(c.center);
            assert!(d <= c.radius + 1e-4, "outside shell: {d}");
            assert!(d >= c.radius - cube - 1e-4, "inside shell: {d}");
            assert_eq!(v.size, cube);
        }
    }

    #[test]
    fn count_is_bounded_by_lattice() {
        for resolution in 1..=8 {
            let c = config(resolution, 2.0, 0, 0.5);
            let n = generate(&c).len();
            assert!(n > 0, "empty shell at resolution {resolution}");
            assert!(n <= c.lattice_len());
        }
    }

    #[test]
    fn resolution_one_keeps_only_center_cell() {
        let voxels = generate(&config(1, 1.0, 0, 1.1));
        assert_eq!(voxels.len(), 1);
        assert_eq!(voxels[0].cell, IVec3::ZERO);
        assert_eq!(voxels[0].size, 2.0);
        assert_eq!(voxels[0].surface, Surface::Water);
    }

    #[test]
    fn threshold_above_noise_range_is_all_water() {
        let voxels = generate(&config(6, 3.0, 9, 1.1));
        assert!(!voxels.is_empty());
        assert_eq!(land_count(&voxels), 0);

        let voxels = generate(&config(6, 3.0, 9, 1.0));
        assert_eq!(land_count(&voxels), 0);
    }

    #[test]
    fn threshold_below_zero_is_all_land() {
        let voxels = generate(&config(6, 3.0, 9, -0.1));
        assert_eq!(land_count(&voxels), voxels.len());
    }

    #[test]
    fn raising_threshold_never_adds_land() {
        let mut previous = usize::MAX;
        for step in 0..=10 {
            let threshold = step as f32 / 10.0;
            let land = land_count(&generate(&config(7, 4.0, 42, threshold)));
            assert!(land <= previous, "land grew at threshold {threshold}");
            previous = land;
        }
    }

    #[test]
    fn threshold_does_not_move_voxels() {
        let a = generate(&config(5, 2.0, 1, 0.2));
        let b = generate(&config(5, 2.0, 1, 0.8));
        assert_eq!(a.len(), b.len());
        for (va, vb) in a.iter().zip(&b) {
            assert_eq!(va.position, vb.position);
        }
    }

    #[test]
    fn degenerate_configs_yield_empty_shell() {
        assert!(generate(&config(0, 5.0, 0, 0.5)).is_empty());
        assert!(generate(&config(-2, 5.0, 0, 0.5)).is_empty());
        assert!(generate(&config(4, 0.0, 0, 0.5)).is_empty());
        assert!(generate(&config(4, -1.0, 0, 0.5)).is_empty());
        assert!(generate(&config(4, f32::INFINITY, 0, 0.5)).is_empty());
    }

    #[test]
    fn shell_is_hollow() {
        let c = config(10, 5.0, 0, 0.5);
        let voxels = generate(&c);
        assert!(voxels.iter().all(|v| v.cell != IVec3::ZERO));
    }
}
