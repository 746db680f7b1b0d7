//! Windowing and graphics seams.
//!
//! The driver never talks to a window system or a GL binding directly; it
//! drives these traits. The real implementation lives in `lumen_gl_backend`;
//! tests substitute recording fakes.

use lumen_core::Size;

/// Identifier of a linked shader program. Zero means "no program".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProgramId(pub u32);

/// Opaque GPU texture handle. Zero is reserved and never names a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

impl TextureId {
    /// The reserved "no texture" handle.
    pub const NONE: Self = Self(0);

    /// Whether this handle names an actual GPU resource.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// A native window surface owning a graphics context.
pub trait Viewport {
    /// Whether the user or the OS has requested this window to close.
    fn should_close(&self) -> bool;

    /// Release the native window resources. The driver never touches the
    /// viewport again after calling this.
    fn destroy(&mut self);

    /// Make this window's graphics context current on the calling thread.
    fn make_context_current(&mut self);

    /// Refresh per-window GL state that depends on settings; called with the
    /// canvas size and the current scale factor before each paint pass.
    fn refresh_context(&mut self, size: Size, scale_factor: f32);

    /// Present the back buffer.
    fn swap_buffers(&mut self);
}

/// The GL calls the driver core needs.
pub trait GraphicsBinding {
    /// Bind a shader program for subsequent draws.
    fn use_program(&mut self, program: ProgramId);

    /// Delete the given textures. Requires a current context on the calling
    /// thread.
    fn delete_textures(&mut self, textures: &[TextureId]);
}

/// The global windowing subsystem.
pub trait WindowingBackend {
    /// Per-window surface type.
    type Viewport: Viewport;
    /// Graphics binding type paired with this windowing system.
    type Graphics: GraphicsBinding;

    /// Poll pending OS input and window events. Global, not per-window:
    /// called once per render tick.
    fn poll_events(&mut self);

    /// Detach whatever context is current so the next window's context can be
    /// made current without cross-window GL-state bleed.
    fn detach_current_context(&mut self);

    /// Shut the windowing subsystem down. Called exactly once, when the
    /// render loop terminates.
    fn terminate(&mut self);
}
