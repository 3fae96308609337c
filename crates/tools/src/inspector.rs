use glam::EulerRot;
use voxglobe_kernel::{Globe, SpinPhase};

/// Globe inspector for developer tooling.
///
/// Provides read-only queries against the globe for debugging and UI panels.
pub struct GlobeInspector;

impl GlobeInspector {
    /// Produce a summary of the globe state.
    pub fn summary(globe: &Globe) -> GlobeSummary {
        let (yaw, pitch, roll) = globe.transform().rotation.to_euler(EulerRot::YXZ);
        let voxel_count = globe.voxels().len();
        let land_count = globe.land_count();
        GlobeSummary {
            tick: globe.tick_count(),
            seed: globe.config().terrain.noise_seed,
            voxel_count,
            land_count,
            water_count: voxel_count - land_count,
            cube_size: globe.config().terrain.cube_size(),
            phase: globe.phase(),
            orientation: [yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees()],
            angular_velocity: globe.angular_velocity().to_array(),
            voxel_hash: globe.voxel_hash(),
            pending_events: globe.events().len(),
        }
    }

    /// Land/water counts per latitude band, north first.
    ///
    /// Bands split the lattice rows evenly by cell `y`; `bands` is clamped to
    /// `1..=rows` so every band covers at least one row.
    pub fn latitude_bands(globe: &Globe, bands: usize) -> Vec<(usize, usize)> {
        let r = globe.config().terrain.resolution.max(0);
        let rows = 2 * r as usize + 1;
        let bands = bands.clamp(1, rows);
        let mut out = vec![(0usize, 0usize); bands];
        for v in globe.voxels() {
            let row = (r - v.cell.y) as usize;
            let band = (row * bands / rows).min(bands - 1);
            if v.surface.is_land() {
                out[band].0 += 1;
            } else {
                out[band].1 += 1;
            }
        }
        out
    }
}

/// Summary of globe state for the inspector.
#[derive(Debug, Clone)]
pub struct GlobeSummary {
    pub tick: u64,
    pub seed: i32,
    pub voxel_count: usize,
    pub land_count: usize,
    pub water_count: usize,
    pub cube_size: Option<f32>,
    pub phase: SpinPhase,
    /// Yaw, pitch, roll in degrees.
    pub orientation: [f32; 3],
    /// Degrees per second.
    pub angular_velocity: [f32; 3],
    pub voxel_hash: u64,
    pub pending_events: usize,
}

impl GlobeSummary {
    /// Share of voxels classified as land, `0.0` for an empty globe.
    pub fn land_fraction(&self) -> f32 {
        if self.voxel_count == 0 {
            0.0
        } else {
            self.land_count as f32 / self.voxel_count as f32
        }
    }
}

impl std::fmt::Display for GlobeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Globe: tick={} seed={} voxels={} land={} water={} phase={} hash={:#018x}",
            self.tick,
            self.seed,
            self.voxel_count,
            self.land_count,
            self.water_count,
            self.phase,
            self.voxel_hash
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxglobe_common::{GlobeConfig, SurfaceMaterials};
    use voxglobe_input::PointerInput;
    use voxglobe_render::PrimitiveList;

    fn globe(resolution: i32, threshold: f32) -> Globe {
        let mut config = GlobeConfig::default();
        config.terrain.resolution = resolution;
        config.terrain.land_threshold = threshold;
        Globe::start(config, SurfaceMaterials::default(), &mut PrimitiveList::new())
    }

    #[test]
    fn summary_empty_globe() {
        let g = globe(0, 0.5);
        let s = GlobeInspector::summary(&g);
        assert_eq!(s.tick, 0);
        assert_eq!(s.voxel_count, 0);
        assert_eq!(s.cube_size, None);
        assert_eq!(s.land_fraction(), 0.0);
    }

    #[test]
    fn summary_counts_and_ticks() {
        let mut g = globe(6, 0.5);
        g.tick(&PointerInput::IDLE, 0.1);
        g.tick(&PointerInput::IDLE, 0.1);

        let s = GlobeInspector::summary(&g);
        assert_eq!(s.tick, 2);
        assert_eq!(s.voxel_count, g.voxels().len());
        assert_eq!(s.land_count + s.water_count, s.voxel_count);
        assert_eq!(s.phase, SpinPhase::PassiveSpin);
        assert_eq!(s.voxel_hash, g.voxel_hash());
        assert_eq!(s.pending_events, 1);
    }

    #[test]
    fn all_water_fraction_is_zero() {
        let s = GlobeInspector::summary(&globe(5, 1.1));
        assert!(s.voxel_count > 0);
        assert_eq!(s.land_fraction(), 0.0);
    }

    #[test]
    fn latitude_bands_cover_every_voxel() {
        let g = globe(8, 0.5);
        let bands = GlobeInspector::latitude_bands(&g, 5);
        assert_eq!(bands.len(), 5);
        let total: usize = bands.iter().map(|(l, w)| l + w).sum();
        assert_eq!(total, g.voxels().len());
        assert_eq!(GlobeInspector::latitude_bands(&g, 0).len(), 1);
    }

    #[test]
    fn latitude_bands_clamp_to_row_count() {
        let g = globe(3, 0.5);
        let bands = GlobeInspector::latitude_bands(&g, usize::MAX);
        assert_eq!(bands.len(), 7);
        // One band per lattice row, north first.
        for (i, (land, water)) in bands.iter().enumerate() {
            let y = 3 - i as i32;
            let in_row = g.voxels().iter().filter(|v| v.cell.y == y).count();
            assert_eq!(land + water, in_row);
        }
        let total: usize = bands.iter().map(|(l, w)| l + w).sum();
        assert_eq!(total, g.voxels().len());
    }

    #[test]
    fn summary_display() {
        let s = GlobeInspector::summary(&globe(3, 0.5));
        let text = format!("{s}");
        assert!(text.contains("tick=0"));
        assert!(text.contains("phase=passive"));
    }
}
