//! Retained canvas primitives.
//!
//! Primitives are the leaves widgets compose: a filled rectangle and a run of
//! text. They hold no GPU state themselves; the render driver textures them
//! on demand and evicts those textures when the objects are replaced.

use parking_lot::Mutex;

use crate::geometry::{Position, Size};
use crate::object::{CanvasObject, ObjectState};
use crate::text::{self, TextStyle};
use crate::theme::{self, Color};

/// A solid-color rectangle.
pub struct Rectangle {
    state: Mutex<ObjectState>,
    fill: Mutex<Color>,
}

impl Rectangle {
    /// Create a rectangle with the given fill color.
    #[must_use]
    pub fn new(fill: Color) -> Self {
        Self {
            state: Mutex::new(ObjectState::default()),
            fill: Mutex::new(fill),
        }
    }

    /// The current fill color.
    #[must_use]
    pub fn fill_color(&self) -> Color {
        *self.fill.lock()
    }

    /// Change the fill color.
    pub fn set_fill_color(&self, fill: Color) {
        *self.fill.lock() = fill;
    }
}

impl CanvasObject for Rectangle {
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
        Size::new(1.0, 1.0)
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
}

/// Everything that styles a [`Text`] primitive.
#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Font size in logical pixels.
    pub size: f32,
    /// Style flags.
    pub style: TextStyle,
    /// Fill color.
    pub color: Color,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: theme::text_size(),
            style: TextStyle::default(),
            color: theme::text_color(),
        }
    }
}

/// A run of text drawn in a single style.
pub struct Text {
    state: Mutex<ObjectState>,
    content: Mutex<String>,
    options: Mutex<TextOptions>,
}

impl Text {
    /// Create a text primitive with default styling.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self::styled(content, TextOptions::default())
    }

    /// Create a text primitive with explicit styling.
    #[must_use]
    pub fn styled(content: impl Into<String>, options: TextOptions) -> Self {
        Self {
            state: Mutex::new(ObjectState::default()),
            content: Mutex::new(content.into()),
            options: Mutex::new(options),
        }
    }

    /// The current text content.
    #[must_use]
    pub fn content(&self) -> String {
        self.content.lock().clone()
    }

    /// Replace the text content.
    pub fn set_content(&self, content: impl Into<String>) {
        *self.content.lock() = content.into();
    }

    /// The current styling.
    #[must_use]
    pub fn options(&self) -> TextOptions {
        *self.options.lock()
    }

    /// Replace the styling.
    pub fn set_options(&self, options: TextOptions) {
        *self.options.lock() = options;
    }
}

impl CanvasObject for Text {
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
        let options = *self.options.lock();
        text::measure_text(&self.content.lock(), options.size, options.style)
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
}
