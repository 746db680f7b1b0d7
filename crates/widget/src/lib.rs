//! Built-in widgets for the lumen toolkit.
//!
//! Widgets are canvas objects composed from the retained primitives in
//! `lumen_core`; they own no GPU state and are safe to mutate from any
//! thread. Repaints are requested through a per-widget refresh hook wired to
//! the owning canvas.

mod base;
pub mod progress;
pub mod text;

pub use base::RefreshHook;
pub use progress::InfiniteProgressBar;
pub use text::{PlainPresenter, TextPresenter, TextProvider};
