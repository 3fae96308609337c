use glam::{Mat4, Vec3};

/// Orbit camera circling a fixed target.
/// Camera motion is independent of the globe's own rotation.
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 90.0_f32.to_radians(),
            pitch: 15.0_f32.to_radians(),
            distance: 15.0,
            min_distance: 1.0,
            max_distance: 200.0,
            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbitCamera {
    /// Camera framing a shell of `radius` around `target`.
    pub fn framing(target: Vec3, radius: f32) -> Self {
        let radius = radius.max(0.5);
        Self {
            target,
            distance: radius * 3.0,
            min_distance: radius * 1.2,
            max_distance: radius * 20.0,
            ..Self::default()
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.yaw.cos() * self.pitch.cos(),
                self.distance * self.pitch.sin(),
                self.distance * self.yaw.sin() * self.pitch.cos(),
            )
    }

    /// Zoom by scroll lines; positive zooms in.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (-lines * 0.1).exp();
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect.max(1e-3), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = OrbitCamera::default();
        assert!((cam.eye().length() - cam.distance).abs() < 1e-4);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn framing_keeps_target_in_view() {
        let target = Vec3::new(2.0, 0.0, 1.0);
        let cam = OrbitCamera::framing(target, 5.0);
        assert_eq!(cam.distance, 15.0);
        let clip = cam.view_projection().project_point3(target);
        assert!(clip.x.abs() < 1e-4 && clip.y.abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::framing(Vec3::ZERO, 5.0);
        for _ in 0..100 {
            cam.zoom(5.0);
        }
        assert_eq!(cam.distance, cam.min_distance);
        for _ in 0..100 {
            cam.zoom(-5.0);
        }
        assert_eq!(cam.distance, cam.max_distance);
    }
}
