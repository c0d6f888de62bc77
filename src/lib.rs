//! Axis gizmo overlay for OpenGL viewers.
//!
//! Renders three colored arrows in a screen corner that track the camera so
//! they always point along world X, Y and Z. The host owns the GL context,
//! the render loop and the camera; this crate owns the arrow mesh, its
//! shader program and the per-frame draw.

pub mod engine;

pub use engine::components::camera::OrbitCamera;
pub use engine::components::mesh::{ build_arrow_mesh, ArrowMesh };
pub use engine::config::{ AxisColors, ConfigError, GizmoConfig };
pub use engine::error::GizmoError;
pub use engine::rendering::{ Axis, GizmoBackend, GizmoOverlay, GlslProfile, ShaderStage };
pub use engine::utils::math::overlay_projection;
