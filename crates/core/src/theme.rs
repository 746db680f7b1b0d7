//! Theme tokens: the colors and spacing the built-in widgets draw with.

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 = opaque.
    pub a: u8,
}

impl Color {
    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

/// Standard padding between widget content and its border.
#[must_use]
pub const fn padding() -> f32 {
    4.0
}

/// Default text size for widget content.
#[must_use]
pub const fn text_size() -> f32 {
    14.0
}

/// Accent color used for active indicators such as progress bars.
#[must_use]
pub const fn primary_color() -> Color {
    Color::rgb(0x3d, 0x99, 0xf5)
}

/// Background color of button-like widgets.
#[must_use]
pub const fn button_color() -> Color {
    Color::rgb(0x2a, 0x2a, 0x2a)
}

/// Foreground color for text content.
#[must_use]
pub const fn text_color() -> Color {
    Color::rgb(0xe6, 0xe6, 0xe6)
}

/// Window background color.
#[must_use]
pub const fn background_color() -> Color {
    Color::rgb(0x14, 0x14, 0x14)
}
