//! The GL-backed canvas.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glow::HasContext as _;
use lumen_core::{Color, ObjectRef, Position, Size, theme, walk_object_tree};
use lumen_driver::{Canvas, ProgramId, RefreshQueue};
use parking_lot::Mutex;

/// Draws one object at its absolute position during a paint pass.
///
/// Rasterization lives behind this hook so the canvas stays renderer
/// agnostic; the driver only cares that painting happens inside its
/// context-current window.
pub type Painter = Box<dyn Fn(&glow::Context, &ObjectRef, Position) + Send + Sync>;

/// A canvas rendering a retained object tree into a GLFW window.
pub struct GlCanvas {
    gl: Arc<glow::Context>,
    program: ProgramId,
    background: Mutex<Color>,
    content: Mutex<Option<ObjectRef>>,
    size: Mutex<Size>,
    dirty: AtomicBool,
    painter: Mutex<Option<Painter>>,
    refresh_queue: RefreshQueue,
}

impl GlCanvas {
    /// Create an empty canvas of the given size.
    #[must_use]
    pub fn new(gl: Arc<glow::Context>, program: ProgramId, size: Size) -> Arc<Self> {
        Arc::new(Self {
            gl,
            program,
            background: Mutex::new(theme::background_color()),
            content: Mutex::new(None),
            size: Mutex::new(size),
            dirty: AtomicBool::new(true),
            painter: Mutex::new(None),
            refresh_queue: RefreshQueue::new(),
        })
    }

    /// Replace the canvas content.
    ///
    /// The previous content tree, if any, is queued for texture eviction:
    /// its objects are no longer reachable from this canvas, so their cached
    /// GPU textures must be reclaimed on the render thread.
    pub fn set_content(&self, root: ObjectRef) {
        let previous = self.content.lock().replace(root);
        if let Some(previous) = previous {
            self.refresh_queue.push(previous);
        }
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// The current content tree.
    #[must_use]
    pub fn content(&self) -> Option<ObjectRef> {
        self.content.lock().clone()
    }

    /// Install the per-object draw hook.
    pub fn set_painter(&self, painter: Painter) {
        *self.painter.lock() = Some(painter);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Change the background clear color.
    pub fn set_background(&self, background: Color) {
        *self.background.lock() = background;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Resize the canvas, as window resize handling would.
    pub fn set_size(&self, size: Size) {
        *self.size.lock() = size;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Mark the canvas as needing a repaint.
    pub fn refresh(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Queue a removed or replaced object for texture eviction.
    pub fn evict(&self, object: ObjectRef) {
        self.refresh_queue.push(object);
    }
}

impl Canvas for GlCanvas {
    fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    fn size(&self) -> Size {
        *self.size.lock()
    }

    fn program(&self) -> ProgramId {
        self.program
    }

    fn paint(&self, _size: Size) {
        let background = *self.background.lock();
        // SAFETY: the driver only paints with this window's context current.
        unsafe {
            self.gl.clear_color(
                f32::from(background.r) / 255.0,
                f32::from(background.g) / 255.0,
                f32::from(background.b) / 255.0,
                f32::from(background.a) / 255.0,
            );
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let painter_slot = self.painter.lock();
        if let (Some(painter), Some(root)) = (painter_slot.as_ref(), self.content()) {
            walk_object_tree(&root, Position::ZERO, &mut |object, position| {
                if object.visible() {
                    painter(&self.gl, object, position);
                }
            });
        }

        self.dirty.store(false, Ordering::SeqCst);
    }

    fn walk_objects(
        &self,
        root: &ObjectRef,
        origin: Position,
        visit: &mut dyn FnMut(&ObjectRef, Position),
    ) {
        walk_object_tree(root, origin, visit);
    }

    fn poll_eviction(&self) -> Option<ObjectRef> {
        self.refresh_queue.poll()
    }
}
