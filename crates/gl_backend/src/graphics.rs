//! The glow-backed graphics binding.

use std::num::NonZeroU32;
use std::sync::Arc;

use glow::HasContext as _;
use lumen_driver::{GraphicsBinding, ProgramId, TextureId};

/// GL calls routed through a shared glow context.
pub struct GlGraphics {
    gl: Arc<glow::Context>,
}

impl GlGraphics {
    /// Wrap a loaded GL context.
    #[must_use]
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }
}

impl GraphicsBinding for GlGraphics {
    fn use_program(&mut self, program: ProgramId) {
        let native = NonZeroU32::new(program.0).map(glow::NativeProgram);
        // SAFETY: only called from the render loop with a context current.
        unsafe {
            self.gl.use_program(native);
        }
    }

    fn delete_textures(&mut self, textures: &[TextureId]) {
        for texture in textures {
            let Some(raw) = NonZeroU32::new(texture.0) else {
                // The reserved zero handle never names a GPU resource.
                continue;
            };
            // SAFETY: only called from the render loop with a context
            // current; the handle came from this context's allocator.
            unsafe {
                self.gl.delete_texture(glow::NativeTexture(raw));
            }
        }
    }
}
