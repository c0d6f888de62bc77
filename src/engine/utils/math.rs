use glam::{ Mat4, Quat, Vec2, Vec3 };

/// Column-major matrix as uploaded with `transpose = false`.
pub type Mat4x4 = [f32; 16];

pub fn to_gl_matrix(matrix: &Mat4) -> Mat4x4 {
    matrix.to_cols_array()
}

/// Overlay-local transform shared by all three arrows.
///
/// Translates to `anchor` (z = 0), applies the inverse of the camera
/// rotation so the arrows stay locked to world axes, then scales by `size`.
pub fn base_transform(anchor: Vec2, camera_rotation: Quat, size: f32) -> Mat4 {
    Mat4::from_translation(anchor.extend(0.0)) *
        Mat4::from_quat(camera_rotation.inverse()) *
        Mat4::from_scale(Vec3::splat(size))
}

/// Orthographic projection from overlay space straight to NDC.
///
/// x and y pass through unchanged; z in [-1, 1] is flipped so +z faces the
/// viewer, matching a right-handed view space.
pub fn overlay_projection() -> Mat4 {
    Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0)
}

/// Splits an affine transform into its rotation and translation, dropping
/// the uniform scale. Used to inspect the gizmo's base transform.
pub fn rotation_and_translation(matrix: &Mat4) -> (Quat, Vec3) {
    let (_, rotation, translation) = matrix.to_scale_rotation_translation();
    (rotation, translation)
}
