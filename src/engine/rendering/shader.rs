use std::fmt;

use log::{ debug, error, warn };

use super::backend::GizmoBackend;
use crate::engine::error::GizmoError;

/// Vertex stage source. Starts with a `#VERSION` placeholder filled in by
/// [`GlslProfile::apply`].
pub const GIZMO_VERTEX_SHADER: &str = include_str!("../../assets/shaders/gizmo.vert.glsl");
pub const GIZMO_FRAGMENT_SHADER: &str = include_str!("../../assets/shaders/gizmo.frag.glsl");

const VERSION_PLACEHOLDER: &str = "#VERSION";

pub const MVP_UNIFORM: &str = "uMVP";
pub const COLOR_UNIFORM: &str = "uColor";
pub const POSITION_ATTRIBUTE: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// GLSL dialect the embedded sources are specialised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlslProfile {
    /// Desktop OpenGL 3.3 core.
    #[default]
    Desktop330,
    /// OpenGL ES 3.0 / WebGL2.
    Es300,
}

impl GlslProfile {
    pub fn header(&self) -> &'static str {
        match self {
            GlslProfile::Desktop330 => "#version 330 core",
            GlslProfile::Es300 => "#version 300 es\nprecision mediump float;",
        }
    }

    pub fn apply(&self, source: &str) -> String {
        source.replacen(VERSION_PLACEHOLDER, self.header(), 1)
    }
}

/// A successfully compiled stage. Must be handed to [`link_program`] or
/// released.
#[derive(Debug)]
pub struct CompiledStage<B: GizmoBackend> {
    raw: B::Shader,
    stage: ShaderStage,
}

impl<B: GizmoBackend> CompiledStage<B> {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn release(self, gl: &B) {
        gl.delete_shader(self.raw);
    }
}

/// Compiles one stage. On failure the shader object is deleted and the
/// driver's info log is returned in [`GizmoError::Compile`].
pub fn compile_stage<B: GizmoBackend>(
    gl: &B,
    stage: ShaderStage,
    source: &str
) -> Result<CompiledStage<B>, GizmoError> {
    let raw = gl.create_shader(stage).map_err(GizmoError::Backend)?;
    gl.compile_shader(raw, source);

    if !gl.shader_compile_status(raw) {
        let log = gl.shader_info_log(raw);
        gl.delete_shader(raw);
        error!("{stage} shader compile error:\n{log}");
        return Err(GizmoError::Compile { stage, log });
    }

    debug!("compiled {stage} shader");
    Ok(CompiledStage { raw, stage })
}

/// Links a vertex and a fragment stage. Both stages are consumed and freed
/// whatever the outcome; a failed link also deletes the program.
pub fn link_program<B: GizmoBackend>(
    gl: &B,
    vertex: CompiledStage<B>,
    fragment: CompiledStage<B>
) -> Result<B::Program, GizmoError> {
    let program = match gl.create_program() {
        Ok(program) => program,
        Err(e) => {
            vertex.release(gl);
            fragment.release(gl);
            return Err(GizmoError::Backend(e));
        }
    };

    gl.attach_shader(program, vertex.raw);
    gl.attach_shader(program, fragment.raw);
    gl.link_program(program);
    let linked = gl.program_link_status(program);

    gl.detach_shader(program, vertex.raw);
    gl.detach_shader(program, fragment.raw);
    vertex.release(gl);
    fragment.release(gl);

    if !linked {
        let log = gl.program_info_log(program);
        gl.delete_program(program);
        error!("program link error:\n{log}");
        return Err(GizmoError::Link { log });
    }

    debug!("linked shader program");
    Ok(program)
}

/// The linked gizmo program with its uniform locations resolved.
#[derive(Debug)]
pub struct ShaderProgram<B: GizmoBackend> {
    raw: B::Program,
    mvp: Option<B::UniformLocation>,
    color: Option<B::UniformLocation>,
}

impl<B: GizmoBackend> ShaderProgram<B> {
    /// Compiles both stages for `profile` and links them.
    pub fn build(
        gl: &B,
        vertex_source: &str,
        fragment_source: &str,
        profile: GlslProfile
    ) -> Result<Self, GizmoError> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, &profile.apply(vertex_source))?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, &profile.apply(fragment_source)) {
            Ok(fragment) => fragment,
            Err(e) => {
                vertex.release(gl);
                return Err(e);
            }
        };
        let raw = link_program(gl, vertex, fragment)?;

        let mvp = gl.uniform_location(raw, MVP_UNIFORM);
        let color = gl.uniform_location(raw, COLOR_UNIFORM);
        for (name, location) in [(MVP_UNIFORM, mvp.is_some()), (COLOR_UNIFORM, color.is_some())] {
            if !location {
                warn!("uniform {name} not found in gizmo program");
            }
        }

        Ok(Self { raw, mvp, color })
    }

    /// Builds the program from the embedded gizmo sources.
    pub fn gizmo(gl: &B, profile: GlslProfile) -> Result<Self, GizmoError> {
        Self::build(gl, GIZMO_VERTEX_SHADER, GIZMO_FRAGMENT_SHADER, profile)
    }

    pub fn raw(&self) -> B::Program {
        self.raw
    }

    pub fn bind(&self, gl: &B) {
        gl.use_program(Some(self.raw));
    }

    pub fn set_mvp(&self, gl: &B, matrix: &[f32; 16]) {
        gl.uniform_matrix4(self.mvp.as_ref(), matrix);
    }

    pub fn set_color(&self, gl: &B, color: [f32; 3]) {
        gl.uniform_vec3(self.color.as_ref(), color);
    }

    pub fn release(self, gl: &B) {
        gl.delete_program(self.raw);
    }
}
