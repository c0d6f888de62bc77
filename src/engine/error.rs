use thiserror::Error;

use crate::engine::rendering::shader::ShaderStage;

/// Errors raised while building or drawing the gizmo overlay.
///
/// Everything `init` returns is fatal for the overlay: the caller must not
/// call `draw_overlay` after a failed `init`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GizmoError {
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link:\n{log}")]
    Link { log: String },

    #[error("gizmo overlay used before init")]
    NotInitialized,

    #[error("gizmo overlay is already initialized; release it first")]
    AlreadyInitialized,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Resource creation failures reported by the GL wrapper.
    #[error("graphics backend error: {0}")]
    Backend(String),
}

impl GizmoError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
