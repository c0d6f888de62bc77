pub mod backend;
pub mod gizmo;
pub mod mesh_buffers;
pub mod shader;
pub mod state;

#[cfg(test)]
pub(crate) mod recording;

pub use backend::{ BufferTarget, DepthFunc, GizmoBackend };
pub use gizmo::{ Axis, GizmoOverlay };
pub use mesh_buffers::MeshBuffers;
pub use shader::{ compile_stage, link_program, CompiledStage, GlslProfile, ShaderProgram, ShaderStage };
pub use state::{ DepthWriteGuard, DepthWriteState };
