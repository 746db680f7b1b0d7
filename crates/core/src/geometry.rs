//! Geometry value types shared across the toolkit.

/// A two-dimensional size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// The zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Component-wise sum of two sizes.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.width + other.width, self.height + other.height)
    }

    /// Component-wise maximum of two sizes.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Whether either dimension is zero or negative.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A position relative to a parent origin, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal offset from the origin.
    pub x: f32,
    /// Vertical offset from the origin.
    pub y: f32,
}

impl Position {
    /// The origin position.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset this position by another.
    #[must_use]
    pub fn translate(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}
