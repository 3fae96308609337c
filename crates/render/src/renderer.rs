use glam::{EulerRot, IVec3, Vec3};
use std::collections::HashMap;
use std::fmt::Write;
use voxglobe_kernel::Globe;
use voxglobe_terrain::Surface;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 15.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

impl RenderView {
    /// A view looking at the globe center from far enough to frame the shell.
    pub fn framing(globe: &Globe) -> Self {
        let terrain = globe.config().terrain;
        let distance = (terrain.radius.max(0.0) * 3.0).max(1.0);
        Self {
            eye: terrain.center + Vec3::Z * distance,
            target: terrain.center,
            ..Self::default()
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads globe state and a view configuration, then produces
/// output. It never mutates the globe.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given globe and view.
    fn render(&self, globe: &Globe, view: &RenderView) -> Self::Output;
}

/// Human-readable frame: counters, orientation and an equatorial slice map.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Append the `y = 0` lattice layer as a character map.
    pub slice: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slice() -> Self {
        Self { slice: true }
    }

    fn write_slice(out: &mut String, globe: &Globe) {
        let r = globe.config().terrain.resolution.max(0);
        let cells: HashMap<IVec3, Surface> = globe
            .voxels()
            .iter()
            .filter(|v| v.cell.y == 0)
            .map(|v| (v.cell, v.surface))
            .collect();

        out.push_str("Equator (y=0): '#' land, '~' water\n");
        for z in -r..=r {
            out.push_str("  ");
            for x in -r..=r {
                let c = match cells.get(&IVec3::new(x, 0, z)) {
                    Some(Surface::Land) => '#',
                    Some(Surface::Water) => '~',
                    None => ' ',
                };
                out.push(c);
            }
            out.push('\n');
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, globe: &Globe, view: &RenderView) -> String {
        let mut out = String::new();
        let terrain = globe.config().terrain;
        let (ex, ey, ez) = globe.transform().rotation.to_euler(EulerRot::YXZ);
        let w = globe.angular_velocity();

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Globe (tick={}, seed={}, phase={}) ===",
            globe.tick_count(),
            terrain.noise_seed,
            globe.phase()
        );
        let _ = writeln!(
            out,
            "Voxels: {} (land={}, water={})",
            globe.voxels().len(),
            globe.land_count(),
            globe.water_count()
        );
        let _ = writeln!(
            out,
            "Orientation: yaw={:.1} pitch={:.1} roll={:.1} spin=({:.1}, {:.1}, {:.1}) deg/s",
            ex.to_degrees(),
            ey.to_degrees(),
            ez.to_degrees(),
            w.x,
            w.y,
            w.z
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        );

        if self.slice {
            Self::write_slice(&mut out, globe);
        }
        out
    }
}
