//! Text measurement with a process-wide cache.
//!
//! The toolkit sizes text through approximate advance-width metrics; real
//! glyph shaping and rasterization belong to the rendering backend. The
//! measurements are memoized because widgets re-measure the same strings on
//! every layout pass, and the cache is cleared wholesale when settings change
//! (a scale-factor change invalidates every cached measurement at once).

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::geometry::Size;

/// Style flags that affect text measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Fixed-advance font.
    pub monospace: bool,
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    // f32 is not Hash; the bit pattern is stable for the sizes we see.
    size_bits: u32,
    style: TextStyle,
}

static FONT_CACHE: Lazy<DashMap<MeasureKey, Size>> = Lazy::new(DashMap::new);

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.35;

/// Measure the rendered size of `text` at the given font size and style.
///
/// Multi-line strings measure as wide as their widest line and as tall as
/// their line count; an empty string still occupies one line of height.
#[must_use]
pub fn measure_text(text: &str, size: f32, style: TextStyle) -> Size {
    let key = MeasureKey {
        text: text.to_owned(),
        size_bits: size.to_bits(),
        style,
    };
    if let Some(cached) = FONT_CACHE.get(&key) {
        return *cached;
    }
    let measured = measure_uncached(text, size, style);
    FONT_CACHE.insert(key, measured);
    measured
}

fn measure_uncached(text: &str, size: f32, style: TextStyle) -> Size {
    let advance = char_advance(size, style);
    let widest = text
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let rows = text.lines().count().max(1);
    Size::new(widest as f32 * advance, rows as f32 * size * LINE_HEIGHT)
}

fn char_advance(size: f32, style: TextStyle) -> f32 {
    if style.monospace {
        size * 0.62
    } else if style.bold {
        size * 0.58
    } else {
        size * 0.55
    }
}

/// Drop every cached measurement.
///
/// Called by the render driver when settings change.
pub fn clear_font_cache() {
    FONT_CACHE.clear();
}

/// Number of cached measurements. Diagnostic only.
#[must_use]
pub fn cached_measurements() -> usize {
    FONT_CACHE.len()
}
