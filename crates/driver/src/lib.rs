//! The lumen render driver.
//!
//! One thread owns the graphics context. This crate enforces that contract:
//! application code on any thread dispatches closures through
//! [`DriverContext`], and a fixed-rate render loop on the owning thread
//! multiplexes those closures with OS event polling, window painting, window
//! teardown, and GPU texture garbage collection.
//!
//! The driver is generic over its windowing and graphics seams
//! ([`backend::WindowingBackend`], [`backend::GraphicsBinding`]) so the loop
//! machinery can be exercised headless; `lumen_gl_backend` provides the real
//! GLFW + OpenGL implementation.

pub mod backend;
pub mod canvas;
pub mod context;
pub mod run_loop;
pub mod textures;

pub use backend::{GraphicsBinding, ProgramId, TextureId, Viewport, WindowingBackend};
pub use canvas::{Canvas, RefreshQueue};
pub use context::DriverContext;
pub use run_loop::{Driver, FRAME_RATE};
pub use textures::TextureCache;
