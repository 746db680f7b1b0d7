//! GLFW windowing and glow (OpenGL) graphics for the lumen driver.
//!
//! This crate supplies the real implementations of the driver seams: a
//! [`GlfwBackend`] windowing subsystem, per-window [`GlfwViewport`]s, a
//! [`GlGraphics`] binding, and a [`GlCanvas`] that clears and walks its
//! retained content each paint pass.

mod canvas;
mod graphics;
mod windowing;

pub use canvas::{GlCanvas, Painter};
pub use graphics::GlGraphics;
pub use windowing::{GlfwBackend, GlfwViewport};
