//! Axis gizmo overlay.
//!
//! Three copies of one arrow mesh, drawn in a fixed screen corner and
//! counter-rotated against the camera so they always point along world
//! +X, +Y and +Z.
//!
//! Lifecycle: `GizmoOverlay::new()` is uninitialized; a successful `init`
//! makes it ready; `draw_overlay` may then be called once per frame; `release`
//! frees the GPU objects and returns it to uninitialized.

use std::f32::consts::FRAC_PI_2;

use glam::{ Mat4, Quat, Vec2, Vec3 };
use log::info;

use super::backend::{ DepthFunc, GizmoBackend };
use super::mesh_buffers::MeshBuffers;
use super::shader::{ GlslProfile, ShaderProgram };
use super::state::DepthWriteGuard;
use crate::engine::components::mesh::build_arrow_mesh;
use crate::engine::config::{ AxisColors, GizmoConfig };
use crate::engine::error::GizmoError;
use crate::engine::utils::math::{ base_transform, to_gl_matrix };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Draw order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Rotation taking the arrow's local +Z onto this axis.
    pub fn extra_rotation(&self) -> Mat4 {
        match self {
            Axis::X => Mat4::from_rotation_y(FRAC_PI_2),
            Axis::Y => Mat4::from_rotation_x(-FRAC_PI_2),
            Axis::Z => Mat4::IDENTITY,
        }
    }

    pub fn direction(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

impl AxisColors {
    pub fn for_axis(&self, axis: Axis) -> [f32; 3] {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

struct OverlayState<B: GizmoBackend> {
    size: f32,
    anchor: Vec2,
    colors: AxisColors,
    program: ShaderProgram<B>,
    mesh: MeshBuffers<B>,
}

pub struct GizmoOverlay<B: GizmoBackend> {
    profile: GlslProfile,
    state: Option<OverlayState<B>>,
}

impl<B: GizmoBackend> GizmoOverlay<B> {
    pub fn new() -> Self {
        Self::with_profile(GlslProfile::default())
    }

    pub fn with_profile(profile: GlslProfile) -> Self {
        Self { profile, state: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Scale factor applied to the arrows, once initialized.
    pub fn size(&self) -> Option<f32> {
        self.state.as_ref().map(|s| s.size)
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.state.as_ref().map(|s| s.anchor)
    }

    /// Builds the arrow mesh, links the program and uploads the geometry.
    ///
    /// Uses 24 segments and the fixed corner anchor. Fails with
    /// [`GizmoError::AlreadyInitialized`] if called twice without `release`.
    pub fn init(&mut self, gl: &B, arrow_length: f32, arrow_radius: f32) -> Result<(), GizmoError> {
        self.init_with_config(gl, &GizmoConfig::with_arrow(arrow_length, arrow_radius))
    }

    pub fn init_with_config(&mut self, gl: &B, config: &GizmoConfig) -> Result<(), GizmoError> {
        if self.state.is_some() {
            return Err(GizmoError::AlreadyInitialized);
        }
        config.validate()?;

        let mesh = build_arrow_mesh(config.arrow_length, config.arrow_radius, config.segments)?;
        let program = ShaderProgram::gizmo(gl, self.profile)?;
        let buffers = match MeshBuffers::upload(gl, &mesh) {
            Ok(buffers) => buffers,
            Err(e) => {
                program.release(gl);
                return Err(e);
            }
        };

        info!(
            "gizmo overlay ready: arrow {}x{}, {} segments, anchor {:?}",
            config.arrow_length,
            config.arrow_radius,
            config.segments,
            config.anchor
        );

        self.state = Some(OverlayState {
            size: config.arrow_length,
            anchor: Vec2::from(config.anchor),
            colors: config.colors,
            program,
            mesh: buffers,
        });
        Ok(())
    }

    /// Anchor translation, inverse camera rotation and arrow scale.
    pub fn base_transform(&self, camera_rotation: Quat) -> Result<Mat4, GizmoError> {
        let state = self.state.as_ref().ok_or(GizmoError::NotInitialized)?;
        Ok(base_transform(state.anchor, camera_rotation, state.size))
    }

    /// Model transform of each arrow, in draw order.
    pub fn axis_transforms(&self, camera_rotation: Quat) -> Result<[(Axis, Mat4); 3], GizmoError> {
        let base = self.base_transform(camera_rotation)?;
        Ok(Axis::ALL.map(|axis| (axis, base * axis.extra_rotation())))
    }

    /// Draws the three arrows over the current frame.
    ///
    /// Depth writes are off for the duration of the call and the previous
    /// mask is restored on every exit path. Depth testing is left enabled
    /// with `LEQUAL`. Before `init` this fails with
    /// [`GizmoError::NotInitialized`] without touching GL state.
    pub fn draw_overlay(
        &self,
        gl: &B,
        camera_rotation: Quat,
        projection_to_ndc: Mat4
    ) -> Result<(), GizmoError> {
        let state = self.state.as_ref().ok_or(GizmoError::NotInitialized)?;
        let base = base_transform(state.anchor, camera_rotation, state.size);

        let _depth = DepthWriteGuard::disable_writes(gl);
        gl.enable_depth_test();
        gl.set_depth_func(DepthFunc::LessEqual);

        state.program.bind(gl);
        state.mesh.bind(gl);

        for axis in Axis::ALL {
            let mvp = projection_to_ndc * base * axis.extra_rotation();
            state.program.set_mvp(gl, &to_gl_matrix(&mvp));
            state.program.set_color(gl, state.colors.for_axis(axis));
            state.mesh.draw(gl);
        }

        gl.bind_vertex_array(None);
        gl.use_program(None);
        Ok(())
    }

    /// Frees the program and mesh buffers. No-op when uninitialized.
    pub fn release(&mut self, gl: &B) {
        if let Some(state) = self.state.take() {
            state.program.release(gl);
            state.mesh.release(gl);
            info!("gizmo overlay released");
        }
    }
}

impl<B: GizmoBackend> Default for GizmoOverlay<B> {
    fn default() -> Self {
        Self::new()
    }
}
