//! The canvas-object model.
//!
//! Everything a canvas can render implements [`CanvasObject`]. Objects are
//! shared behind [`ObjectRef`] so application code, widgets, and the render
//! driver can all hold the same object; identity (not equality) keys the
//! driver's texture cache.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::{Position, Size};

/// A reference-counted handle to a canvas object.
pub type ObjectRef = Arc<dyn CanvasObject>;

/// Anything that can be placed on a canvas and rendered.
///
/// Objects use interior mutability: geometry setters take `&self` so shared
/// handles can be repositioned by layout code without exclusive ownership.
pub trait CanvasObject: Send + Sync {
    /// The current size of this object.
    fn size(&self) -> Size;

    /// The current position of this object, relative to its parent.
    fn position(&self) -> Position;

    /// Set a new size for this object.
    fn resize(&self, size: Size);

    /// Move this object to a new position, relative to its parent.
    fn move_to(&self, position: Position);

    /// The smallest size this object can usefully shrink to.
    fn min_size(&self) -> Size;

    /// Whether this object should currently be rendered.
    fn visible(&self) -> bool;

    /// Show this object, if it was previously hidden.
    fn show(&self);

    /// Hide this object, if it was previously visible.
    fn hide(&self);

    /// Direct children of this object, in paint order.
    fn children(&self) -> Vec<ObjectRef> {
        Vec::new()
    }
}

/// Identity of a canvas object, derived from its allocation.
///
/// Two `ObjectId`s compare equal exactly when they were taken from clones of
/// the same [`ObjectRef`]. Used as the key of the driver's texture cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    /// The identity of the given object handle.
    #[must_use]
    pub fn of(object: &ObjectRef) -> Self {
        Self(Arc::as_ptr(object) as *const () as usize)
    }
}

/// Shared geometry state embedded by concrete objects.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ObjectState {
    pub size: Size,
    pub position: Position,
    pub hidden: bool,
}

/// Walk an object tree depth-first, visiting every object with its absolute
/// position (the accumulated parent origin plus the object's own position).
pub fn walk_object_tree(
    object: &ObjectRef,
    origin: Position,
    visit: &mut dyn FnMut(&ObjectRef, Position),
) {
    let position = origin.translate(object.position());
    visit(object, position);
    for child in object.children() {
        walk_object_tree(&child, position, visit);
    }
}

/// A plain grouping object holding children in paint order.
#[derive(Default)]
pub struct Container {
    state: Mutex<ObjectState>,
    children: Mutex<Vec<ObjectRef>>,
}

impl Container {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container holding the given objects.
    #[must_use]
    pub fn with_children(children: Vec<ObjectRef>) -> Self {
        Self {
            state: Mutex::new(ObjectState::default()),
            children: Mutex::new(children),
        }
    }

    /// Append a child object.
    pub fn add(&self, child: ObjectRef) {
        self.children.lock().push(child);
    }

    /// Remove a child object by identity, returning it if present.
    ///
    /// The caller is responsible for queueing the removed object for texture
    /// eviction on the canvas it was rendered to.
    pub fn remove(&self, child: &ObjectRef) -> Option<ObjectRef> {
        let target = ObjectId::of(child);
        let mut children = self.children.lock();
        let index = children.iter().position(|entry| ObjectId::of(entry) == target)?;
        Some(children.remove(index))
    }
}

impl CanvasObject for Container {
    fn size(&self) -> Size {
        self.state.lock().size
    }

    fn position(&self) -> Position {
        self.state.lock().position
    }

    fn resize(&self, size: Size) {
        self.state.lock().size = size;
    }

    fn move_to(&self, position: Position) {
        self.state.lock().position = position;
    }

    fn min_size(&self) -> Size {
        self.children
            .lock()
            .iter()
            .fold(Size::ZERO, |acc, child| acc.max(child.min_size()))
    }

    fn visible(&self) -> bool {
        !self.state.lock().hidden
    }

    fn show(&self) {
        self.state.lock().hidden = false;
    }

    fn hide(&self) {
        self.state.lock().hidden = true;
    }

    fn children(&self) -> Vec<ObjectRef> {
        self.children.lock().clone()
    }
}
