//! Shared widget plumbing.

use lumen_core::{Position, Size};

/// Asks the owning canvas for a repaint. Installed by whoever places the
/// widget on a canvas.
pub type RefreshHook = Box<dyn Fn() + Send + Sync>;

/// Geometry and visibility state every widget carries.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BaseWidget {
    pub size: Size,
    pub position: Position,
    pub hidden: bool,
}
