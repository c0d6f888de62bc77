use log::debug;

use super::backend::{ BufferTarget, GizmoBackend };
use super::shader::POSITION_ATTRIBUTE;
use crate::engine::components::mesh::ArrowMesh;
use crate::engine::error::GizmoError;

/// GPU copy of an [`ArrowMesh`]: vertex array, vertex buffer and index buffer.
///
/// Uploaded once and never modified afterwards.
#[derive(Debug)]
pub struct MeshBuffers<B: GizmoBackend> {
    vao: B::VertexArray,
    vbo: B::Buffer,
    ebo: B::Buffer,
    index_count: i32,
}

impl<B: GizmoBackend> MeshBuffers<B> {
    pub fn upload(gl: &B, mesh: &ArrowMesh) -> Result<Self, GizmoError> {
        let index_count = i32::try_from(mesh.index_count())
            .map_err(|_| GizmoError::invalid("arrow mesh has too many indices"))?;

        let vao = gl.create_vertex_array().map_err(GizmoError::Backend)?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                gl.delete_vertex_array(vao);
                return Err(GizmoError::Backend(e));
            }
        };
        let ebo = match gl.create_buffer() {
            Ok(ebo) => ebo,
            Err(e) => {
                gl.delete_buffer(vbo);
                gl.delete_vertex_array(vao);
                return Err(GizmoError::Backend(e));
            }
        };

        gl.bind_vertex_array(Some(vao));
        gl.upload_buffer(BufferTarget::Vertex, vbo, bytemuck::cast_slice(mesh.vertices()));
        gl.enable_float_attribute(POSITION_ATTRIBUTE, 3);
        gl.upload_buffer(BufferTarget::Index, ebo, bytemuck::cast_slice(mesh.indices()));
        gl.bind_vertex_array(None);

        debug!(
            "uploaded arrow mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Self { vao, vbo, ebo, index_count })
    }

    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    pub fn bind(&self, gl: &B) {
        gl.bind_vertex_array(Some(self.vao));
    }

    /// Issues one indexed draw. The vertex array must be bound.
    pub fn draw(&self, gl: &B) {
        gl.draw_triangles_u32(self.index_count);
    }

    pub fn release(self, gl: &B) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ebo);
    }
}
