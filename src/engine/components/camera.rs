use glam::{ Mat4, Quat, Vec3 };

/// Pitch limit, just short of straight up/down.
const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera circling a target point.
///
/// Yaw turns about world +Y, pitch about the camera's local X. With both at
/// zero the camera sits on +Z looking down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    yaw: f32,
    pitch: f32,
    initial: (Vec3, f32, f32, f32),
}

impl OrbitCamera {
    pub fn new(target: Vec3, distance: f32, yaw: f32, pitch: f32) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            target,
            distance,
            yaw,
            pitch,
            initial: (target, distance, yaw, pitch),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Add rotation delta for mouse drag
    pub fn add_rotation_delta(&mut self, pitch_delta: f32, yaw_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn reset(&mut self) {
        let (target, distance, yaw, pitch) = self.initial;
        self.target = target;
        self.distance = distance;
        self.yaw = yaw;
        self.pitch = pitch;
    }

    /// Camera-to-world orientation. This is what the gizmo overlay expects.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    pub fn position(&self) -> Vec3 {
        self.target + self.rotation() * Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position()).inverse()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 3.0, 0.6, -0.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn zero_angles_look_down_negative_z() {
        let camera = OrbitCamera::new(Vec3::ZERO, 2.0, 0.0, 0.0);
        assert!(camera.rotation().abs_diff_eq(Quat::IDENTITY, EPS));
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), EPS));
    }

    #[test]
    fn view_matrix_maps_target_in_front_of_camera() {
        let camera = OrbitCamera::new(Vec3::new(1.0, 0.5, -2.0), 4.0, 0.8, -0.3);
        let view = camera.view_matrix();

        assert!(view.transform_point3(camera.position()).abs_diff_eq(Vec3::ZERO, 1e-4));
        assert!(view.transform_point3(camera.target).abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-4));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = OrbitCamera::new(Vec3::ZERO, 1.0, 0.0, 0.0);
        camera.add_rotation_delta(10.0, 0.25);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        assert_eq!(camera.yaw(), 0.25);

        camera.add_rotation_delta(-20.0, 0.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn reset_restores_initial_orbit() {
        let mut camera = OrbitCamera::default();
        let initial = camera.clone();
        camera.add_rotation_delta(0.3, -1.0);
        camera.distance = 10.0;
        camera.reset();
        assert_eq!(camera, initial);
    }
}
