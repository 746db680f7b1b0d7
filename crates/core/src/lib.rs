//! Core types for the lumen toolkit: geometry, the canvas-object model,
//! retained primitives, settings, theme tokens, and text measurement.

pub mod geometry;
pub mod object;
pub mod primitives;
pub mod settings;
pub mod text;
pub mod theme;

pub use geometry::{Position, Size};
pub use object::{CanvasObject, Container, ObjectId, ObjectRef, walk_object_tree};
pub use primitives::{Rectangle, Text};
pub use settings::Settings;
pub use text::{TextStyle, clear_font_cache, measure_text};
pub use theme::Color;
