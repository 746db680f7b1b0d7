//! The canvas seam the render loop drives.

use crossbeam::channel::{Receiver, Sender, unbounded};
use lumen_core::{ObjectRef, Position, Size};

use crate::backend::ProgramId;

/// A paintable surface backing one window.
///
/// Implementations own a retained object tree and a dirty flag. The driver
/// polls [`Canvas::is_dirty`] once per frame and calls [`Canvas::paint`] only
/// when it reports pending changes; a successful paint clears the flag.
pub trait Canvas: Send + Sync {
    /// Whether this canvas has unpainted pending changes.
    fn is_dirty(&self) -> bool;

    /// Current logical size of the canvas.
    fn size(&self) -> Size;

    /// The shader program this canvas renders with.
    fn program(&self) -> ProgramId;

    /// Paint the canvas content at the given size and clear the dirty flag.
    /// Only called with this window's context current.
    fn paint(&self, size: Size);

    /// Walk the object tree rooted at `root` depth-first, invoking `visit`
    /// with every object and its absolute position.
    fn walk_objects(
        &self,
        root: &ObjectRef,
        origin: Position,
        visit: &mut dyn FnMut(&ObjectRef, Position),
    );

    /// Take one object awaiting texture eviction, if any.
    ///
    /// Drained by the driver once per tick until it returns `None`; must
    /// never block.
    fn poll_eviction(&self) -> Option<ObjectRef>;
}

/// The per-canvas queue of objects awaiting texture eviction.
///
/// Any component that removes or replaces a rendered object pushes it here;
/// only the render thread drains it, via [`Canvas::poll_eviction`].
pub struct RefreshQueue {
    sender: Sender<ObjectRef>,
    receiver: Receiver<ObjectRef>,
}

impl RefreshQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Queue an object for texture eviction. Never blocks.
    pub fn push(&self, object: ObjectRef) {
        // Send only fails when the receiver half is gone, and we own it.
        if self.sender.send(object).is_err() {
            log::debug!("refresh queue closed; eviction request dropped");
        }
    }

    /// Take the next queued object without blocking.
    #[must_use]
    pub fn poll(&self) -> Option<ObjectRef> {
        self.receiver.try_recv().ok()
    }
}

impl Default for RefreshQueue {
    fn default() -> Self {
        Self::new()
    }
}
