//! GLFW-backed windowing subsystem and viewports.

use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};
use glfw::{Context as _, Glfw, GlfwReceiver, PWindow, WindowEvent, WindowHint, WindowMode};
use glow::HasContext as _;
use log::{debug, info};
use lumen_core::Size;
use lumen_driver::Viewport;

/// The global GLFW state plus the shared GL function loader.
///
/// Desktop GL entry points are context-independent once loaded, so one glow
/// context (loaded through the first window) is shared by every viewport and
/// by the graphics binding.
pub struct GlfwBackend {
    glfw: Glfw,
    gl: Option<Arc<glow::Context>>,
}

impl GlfwBackend {
    /// Initialize GLFW.
    ///
    /// Must be called on the thread that will run the render loop; GLFW has
    /// the same main-thread affinity the driver enforces.
    ///
    /// # Errors
    /// Returns an error if the GLFW library fails to initialize.
    pub fn new() -> Result<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors!())
            .map_err(|error| anyhow!("failed to initialize GLFW: {error:?}"))?;
        glfw.window_hint(WindowHint::ContextVersion(3, 2));
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        info!("windowing subsystem initialized");
        Ok(Self { glfw, gl: None })
    }

    /// Create a native window and hand back its viewport.
    ///
    /// The first call also loads the GL function pointers; fetch them with
    /// [`GlfwBackend::graphics`] afterwards.
    ///
    /// # Errors
    /// Returns an error if window or context creation fails.
    pub fn create_viewport(&mut self, title: &str, size: Size) -> Result<GlfwViewport> {
        let (mut window, events) = self
            .glfw
            .create_window(
                size.width as u32,
                size.height as u32,
                title,
                WindowMode::Windowed,
            )
            .context("failed to create a native window")?;

        if self.gl.is_none() {
            window.make_current();
            // SAFETY: the window's context is current on this thread, so the
            // loader resolves entry points against a live GL context.
            let gl = unsafe {
                glow::Context::from_loader_function(|name| {
                    window.get_proc_address(name) as *const _
                })
            };
            glfw::make_context_current(None);
            self.gl = Some(Arc::new(gl));
        }

        let gl = self
            .gl
            .clone()
            .ok_or_else(|| anyhow!("GL function pointers were not loaded"))?;
        debug!("created {}x{} viewport '{title}'", size.width, size.height);
        Ok(GlfwViewport {
            window: Some(window),
            _events: events,
            gl,
        })
    }

    /// The loaded GL context, once a viewport exists.
    #[must_use]
    pub fn graphics(&self) -> Option<Arc<glow::Context>> {
        self.gl.clone()
    }
}

impl lumen_driver::WindowingBackend for GlfwBackend {
    type Viewport = GlfwViewport;
    type Graphics = super::GlGraphics;

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    fn detach_current_context(&mut self) {
        glfw::make_context_current(None);
    }

    fn terminate(&mut self) {
        // GLFW itself shuts down when the last window and the Glfw handle
        // drop; nothing further to release here.
        info!("windowing subsystem terminating");
    }
}

/// One native window and its GL context.
pub struct GlfwViewport {
    // `None` after destruction; dropping the window releases the native
    // resources.
    window: Option<PWindow>,
    _events: GlfwReceiver<(f64, WindowEvent)>,
    gl: Arc<glow::Context>,
}

impl GlfwViewport {
    /// Programmatically request this window to close, as the OS close button
    /// would.
    pub fn request_close(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.set_should_close(true);
        }
    }
}

impl Viewport for GlfwViewport {
    fn should_close(&self) -> bool {
        self.window.as_ref().is_none_or(|window| window.should_close())
    }

    fn destroy(&mut self) {
        // Dropping the PWindow destroys the native window.
        self.window = None;
    }

    fn make_context_current(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.make_current();
        }
    }

    fn refresh_context(&mut self, size: Size, scale_factor: f32) {
        let width = (size.width * scale_factor) as i32;
        let height = (size.height * scale_factor) as i32;
        // SAFETY: only called from the render loop with this window's
        // context current.
        unsafe {
            self.gl.viewport(0, 0, width.max(1), height.max(1));
        }
    }

    fn swap_buffers(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.swap_buffers();
        }
    }
}
