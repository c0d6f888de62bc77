//! In-memory `GizmoBackend` for tests. Hands out sequential ids, tracks live
//! objects and records every call in order.

use std::cell::RefCell;
use std::collections::BTreeSet;

use super::backend::{ BufferTarget, DepthFunc, GizmoBackend };
use super::shader::ShaderStage;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    UniformLocation(String),
    UniformMatrix4(Option<String>, [f32; 16]),
    UniformVec3(Option<String>, [f32; 3]),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    UploadBuffer(BufferTarget, u32, usize),
    DeleteBuffer(u32),
    EnableFloatAttribute(u32, i32),
    DrawTriangles(i32),
    QueryDepthWriteMask,
    DepthWriteMask(bool),
    EnableDepthTest,
    DepthFunc(DepthFunc),
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u32,
    calls: Vec<Call>,
    live: BTreeSet<u32>,
    sources: Vec<(u32, ShaderStage, String)>,
    depth_write: bool,
    draws: usize,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    inner: RefCell<Inner>,
    pub fail_compile: Option<ShaderStage>,
    pub fail_link: bool,
    pub fail_buffer_creation: bool,
    pub missing_uniforms: Vec<&'static str>,
    /// Panics when the draw with this zero-based ordinal is issued.
    pub panic_on_draw: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.inner.borrow_mut().depth_write = true;
        backend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Number of objects created and not yet deleted.
    pub fn live_objects(&self) -> usize {
        self.inner.borrow().live.len()
    }

    pub fn draws(&self) -> usize {
        self.inner.borrow().draws
    }

    pub fn source_of(&self, stage: ShaderStage) -> Option<String> {
        self.inner
            .borrow()
            .sources.iter()
            .find(|(_, s, _)| *s == stage)
            .map(|(_, _, src)| src.clone())
    }

    fn record(&self, call: Call) {
        self.inner.borrow_mut().calls.push(call);
    }

    fn allocate(&self) -> u32 {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.live.insert(id);
        id
    }

    fn free(&self, id: u32) {
        let removed = self.inner.borrow_mut().live.remove(&id);
        assert!(removed, "object {id} deleted twice or never created");
    }

    fn stage_of(&self, shader: u32) -> Option<ShaderStage> {
        self.inner
            .borrow()
            .sources.iter()
            .find(|(id, _, _)| *id == shader)
            .map(|(_, stage, _)| *stage)
    }
}

impl GizmoBackend for RecordingBackend {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.allocate();
        self.inner.borrow_mut().sources.push((id, stage, String::new()));
        self.record(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn compile_shader(&self, shader: u32, source: &str) {
        if let Some(entry) = self.inner.borrow_mut().sources.iter_mut().find(|(id, _, _)| *id == shader) {
            entry.2 = source.to_string();
        }
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.fail_compile.is_none() || self.fail_compile != self.stage_of(shader)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        format!("0:1(1): error: syntax error in shader {shader}")
    }

    fn delete_shader(&self, shader: u32) {
        self.free(shader);
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.allocate();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: u32) -> String {
        "error: vColor not written by vertex shader".to_string()
    }

    fn delete_program(&self, program: u32) {
        self.free(program);
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        self.record(Call::UniformLocation(name.to_string()));
        if self.missing_uniforms.iter().any(|missing| *missing == name) {
            None
        } else {
            Some(name.to_string())
        }
    }

    fn uniform_matrix4(&self, location: Option<&String>, matrix: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location.cloned(), *matrix));
    }

    fn uniform_vec3(&self, location: Option<&String>, value: [f32; 3]) {
        self.record(Call::UniformVec3(location.cloned(), value));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.allocate();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vao: Option<u32>) {
        self.record(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.free(vao);
        self.record(Call::DeleteVertexArray(vao));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_buffer_creation {
            return Err("out of memory".to_string());
        }
        let id = self.allocate();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn upload_buffer(&self, target: BufferTarget, buffer: u32, data: &[u8]) {
        self.record(Call::UploadBuffer(target, buffer, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.free(buffer);
        self.record(Call::DeleteBuffer(buffer));
    }

    fn enable_float_attribute(&self, location: u32, components: i32) {
        self.record(Call::EnableFloatAttribute(location, components));
    }

    fn draw_triangles_u32(&self, index_count: i32) {
        let ordinal = {
            let mut inner = self.inner.borrow_mut();
            inner.draws += 1;
            inner.draws - 1
        };
        if self.panic_on_draw == Some(ordinal) {
            panic!("simulated failure on draw {ordinal}");
        }
        self.record(Call::DrawTriangles(index_count));
    }

    fn depth_write_mask(&self) -> bool {
        self.record(Call::QueryDepthWriteMask);
        self.inner.borrow().depth_write
    }

    fn set_depth_write_mask(&self, enabled: bool) {
        self.inner.borrow_mut().depth_write = enabled;
        self.record(Call::DepthWriteMask(enabled));
    }

    fn enable_depth_test(&self) {
        self.record(Call::EnableDepthTest);
    }

    fn set_depth_func(&self, func: DepthFunc) {
        self.record(Call::DepthFunc(func));
    }
}
