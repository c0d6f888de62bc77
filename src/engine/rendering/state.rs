use super::backend::GizmoBackend;

/// Depth-write mask captured before an overlay pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthWriteState {
    pub write_enabled: bool,
}

impl DepthWriteState {
    pub fn capture<B: GizmoBackend>(gl: &B) -> Self {
        Self {
            write_enabled: gl.depth_write_mask(),
        }
    }

    pub fn restore<B: GizmoBackend>(&self, gl: &B) {
        gl.set_depth_write_mask(self.write_enabled);
    }
}

/// Disables depth writes for its lifetime and puts the captured mask back
/// on drop, including during unwinding.
#[must_use = "depth writes are restored as soon as the guard is dropped"]
pub struct DepthWriteGuard<'a, B: GizmoBackend> {
    gl: &'a B,
    saved: DepthWriteState,
}

impl<'a, B: GizmoBackend> DepthWriteGuard<'a, B> {
    pub fn disable_writes(gl: &'a B) -> Self {
        let saved = DepthWriteState::capture(gl);
        gl.set_depth_write_mask(false);
        Self { gl, saved }
    }

    pub fn saved(&self) -> DepthWriteState {
        self.saved
    }
}

impl<B: GizmoBackend> Drop for DepthWriteGuard<'_, B> {
    fn drop(&mut self) {
        self.saved.restore(self.gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rendering::recording::{ Call, RecordingBackend };

    #[test]
    fn guard_restores_enabled_mask() {
        let gl = RecordingBackend::new();
        {
            let guard = DepthWriteGuard::disable_writes(&gl);
            assert!(guard.saved().write_enabled);
            assert!(!gl.depth_write_mask());
        }
        assert!(gl.depth_write_mask());
    }

    #[test]
    fn guard_restores_disabled_mask() {
        let gl = RecordingBackend::new();
        gl.set_depth_write_mask(false);
        gl.clear_calls();
        {
            let _guard = DepthWriteGuard::disable_writes(&gl);
        }
        assert_eq!(
            gl.calls(),
            vec![Call::QueryDepthWriteMask, Call::DepthWriteMask(false), Call::DepthWriteMask(false)]
        );
        assert!(!gl.depth_write_mask());
    }

    #[test]
    fn guard_restores_while_unwinding() {
        let gl = RecordingBackend::new();
        let result = std::panic::catch_unwind(
            std::panic::AssertUnwindSafe(|| {
                let _guard = DepthWriteGuard::disable_writes(&gl);
                panic!("draw failed");
            })
        );
        assert!(result.is_err());
        assert!(gl.depth_write_mask());
    }
}
