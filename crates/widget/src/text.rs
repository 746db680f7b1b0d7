//! The text provider: the multi-line buffer behind text-based widgets.
//!
//! Labels and entries share this type: it owns the character buffer, keeps
//! per-row bounds in sync with every edit, and answers row-oriented queries
//! for layout and cursor handling. Presentation concerns (password masking,
//! style) come from a presenter hook supplied by the owning widget.

use lumen_core::text::TextStyle;
use lumen_core::{CanvasObject, Color, Position, Size, measure_text, theme};
use parking_lot::{Mutex, RwLock};

use crate::base::BaseWidget;

const PASSWORD_CHAR: char = '*';

/// Widget-specific presentation for a [`TextProvider`].
pub trait TextPresenter: Send + Sync {
    /// Whether content is concealed, as in a password entry.
    fn password(&self) -> bool {
        false
    }

    /// Style the text measures and renders with.
    fn text_style(&self) -> TextStyle {
        TextStyle::default()
    }

    /// Color the text renders with.
    fn text_color(&self) -> Color {
        theme::text_color()
    }
}

/// The default presenter: visible text, default style and color.
pub struct PlainPresenter;

impl TextPresenter for PlainPresenter {}

struct TextBuffer {
    chars: Vec<char>,
    // (start, end) index pairs into `chars`, one per row, exclusive end.
    row_bounds: Vec<(usize, usize)>,
}

impl TextBuffer {
    fn new(text: &str) -> Self {
        let mut buffer = Self {
            chars: text.chars().collect(),
            row_bounds: Vec::new(),
        };
        buffer.update_row_bounds();
        buffer
    }

    // Recomputed on every buffer change; rows split on '\n', and an empty
    // buffer still has exactly one empty row.
    fn update_row_bounds(&mut self) {
        self.row_bounds.clear();
        if self.chars.is_empty() {
            self.row_bounds.push((0, 0));
            return;
        }

        let mut low = 0;
        let mut high = 0;
        for (index, character) in self.chars.iter().enumerate() {
            high = index;
            if *character != '\n' {
                continue;
            }
            self.row_bounds.push((low, index));
            low = index + 1;
        }
        high += 1;
        self.row_bounds.push((low, high));
    }

    fn row(&self, index: usize) -> Option<String> {
        let (low, high) = *self.row_bounds.get(index)?;
        Some(self.chars[low..high].iter().collect())
    }
}

/// A multi-line text buffer with row bookkeeping.
pub struct TextProvider {
    base: Mutex<BaseWidget>,
    presenter: Box<dyn TextPresenter>,
    buffer: RwLock<TextBuffer>,
}

impl TextProvider {
    /// Create a provider over the given text.
    #[must_use]
    pub fn new(text: &str, presenter: Box<dyn TextPresenter>) -> Self {
        Self {
            base: Mutex::new(BaseWidget::default()),
            presenter,
            buffer: RwLock::new(TextBuffer::new(text)),
        }
    }

    /// The whole buffer as a string.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.read().chars.iter().collect()
    }

    /// Replace the whole buffer.
    pub fn set_text(&self, text: &str) {
        let mut buffer = self.buffer.write();
        buffer.chars = text.chars().collect();
        buffer.update_row_bounds();
    }

    /// Number of characters in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.read().chars.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.read().chars.is_empty()
    }

    /// Insert text at the given character position.
    ///
    /// A position past the end appends: an out-of-sync cursor must not lose
    /// input.
    pub fn insert_at(&self, position: usize, text: &str) {
        let mut buffer = self.buffer.write();
        if buffer.chars.len() < position {
            buffer.chars.extend(text.chars());
        } else {
            let tail = buffer.chars.split_off(position);
            buffer.chars.extend(text.chars());
            buffer.chars.extend(tail);
        }
        buffer.update_row_bounds();
    }

    /// Remove the characters between `low` (inclusive) and `high`
    /// (exclusive), returning the removed text. Bounds are clamped to the
    /// buffer.
    pub fn delete_from_to(&self, low: usize, high: usize) -> String {
        let mut buffer = self.buffer.write();
        let length = buffer.chars.len();
        let low = low.min(length);
        let high = high.clamp(low, length);
        let deleted: String = buffer.chars.drain(low..high).collect();
        buffer.update_row_bounds();
        deleted
    }

    /// Number of rows in the buffer. Always at least one.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.buffer.read().row_bounds.len()
    }

    /// The characters of the given row, without its trailing newline.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<String> {
        self.buffer.read().row(index)
    }

    /// Number of characters in the given row.
    #[must_use]
    pub fn row_length(&self, index: usize) -> Option<usize> {
        Some(self.row(index)?.chars().count())
    }

    /// The given row as it should be displayed: masked when the presenter
    /// reports password content.
    #[must_use]
    pub fn display_row(&self, index: usize) -> Option<String> {
        let row = self.row(index)?;
        if self.presenter.password() {
            return Some(PASSWORD_CHAR.to_string().repeat(row.chars().count()));
        }
        Some(row)
    }

    /// The average character cell used for cursor and sizing math.
    #[must_use]
    pub fn char_min_size(&self) -> Size {
        let sample = if self.presenter.password() {
            PASSWORD_CHAR.to_string()
        } else {
            "M".to_owned()
        };
        measure_text(&sample, theme::text_size(), self.presenter.text_style())
    }
}

impl CanvasObject for TextProvider {
    fn size(&self) -> Size {
        self.base.lock().size
    }

    fn position(&self) -> Position {
        self.base.lock().position
    }

    fn resize(&self, size: Size) {
        self.base.lock().size = size;
    }

    fn move_to(&self, position: Position) {
        self.base.lock().position = position;
    }

    // Wide enough for the widest row, tall enough for every row; empty rows
    // still take one character cell of height.
    fn min_size(&self) -> Size {
        let style = self.presenter.text_style();
        let char_cell = self.char_min_size();
        let mut content = Size::ZERO;
        for index in 0..self.rows() {
            let row = self.display_row(index).unwrap_or_default();
            let measured = if row.is_empty() {
                Size::new(0.0, char_cell.height)
            } else {
                measure_text(&row, theme::text_size(), style)
            };
            content.width = content.width.max(measured.width);
            content.height += measured.height;
        }
        content.add(Size::new(theme::padding() * 2.0, theme::padding() * 2.0))
    }

    fn visible(&self) -> bool {
        !self.base.lock().hidden
    }

    fn show(&self) {
        self.base.lock().hidden = false;
    }

    fn hide(&self) {
        self.base.lock().hidden = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(text: &str) -> TextProvider {
        TextProvider::new(text, Box::new(PlainPresenter))
    }

    struct PasswordPresenter;

    impl TextPresenter for PasswordPresenter {
        fn password(&self) -> bool {
            true
        }
    }

    #[test]
    fn empty_buffer_has_one_empty_row() {
        let text = provider("");
        assert_eq!(text.rows(), 1);
        assert_eq!(text.row(0).as_deref(), Some(""));
        assert_eq!(text.row_length(0), Some(0));
    }

    #[test]
    fn rows_split_on_newlines() {
        let text = provider("ab\ncd");
        assert_eq!(text.rows(), 2);
        assert_eq!(text.row(0).as_deref(), Some("ab"));
        assert_eq!(text.row(1).as_deref(), Some("cd"));
        assert_eq!(text.row(2), None);
    }

    #[test]
    fn trailing_newline_creates_an_empty_row() {
        let text = provider("ab\n");
        assert_eq!(text.rows(), 2);
        assert_eq!(text.row(0).as_deref(), Some("ab"));
        assert_eq!(text.row(1).as_deref(), Some(""));
    }

    #[test]
    fn set_text_recomputes_rows() {
        let text = provider("one");
        text.set_text("one\ntwo\nthree");
        assert_eq!(text.rows(), 3);
        assert_eq!(text.row(2).as_deref(), Some("three"));
        assert_eq!(text.text(), "one\ntwo\nthree");
    }

    #[test]
    fn insert_in_the_middle() {
        let text = provider("hero");
        text.insert_at(2, "ll");
        assert_eq!(text.text(), "hello");
        assert_eq!(text.len(), 5);
    }

    #[test]
    fn insert_past_the_end_appends() {
        let text = provider("ab");
        text.insert_at(99, "cd");
        assert_eq!(text.text(), "abcd");
    }

    #[test]
    fn inserting_newlines_adds_rows() {
        let text = provider("abcd");
        text.insert_at(2, "\n");
        assert_eq!(text.rows(), 2);
        assert_eq!(text.row(0).as_deref(), Some("ab"));
        assert_eq!(text.row(1).as_deref(), Some("cd"));
    }

    #[test]
    fn delete_returns_the_removed_text() {
        let text = provider("hello world");
        let deleted = text.delete_from_to(5, 11);
        assert_eq!(deleted, " world");
        assert_eq!(text.text(), "hello");
    }

    #[test]
    fn delete_joining_rows() {
        let text = provider("ab\ncd");
        let deleted = text.delete_from_to(2, 3);
        assert_eq!(deleted, "\n");
        assert_eq!(text.rows(), 1);
        assert_eq!(text.row(0).as_deref(), Some("abcd"));
    }

    #[test]
    fn delete_clamps_out_of_range_bounds() {
        let text = provider("abc");
        let deleted = text.delete_from_to(2, 99);
        assert_eq!(deleted, "c");
        assert_eq!(text.text(), "ab");
    }

    #[test]
    fn password_rows_are_masked() {
        let text = TextProvider::new("secret", Box::new(PasswordPresenter));
        assert_eq!(text.display_row(0).as_deref(), Some("******"));
        // The underlying buffer is untouched.
        assert_eq!(text.row(0).as_deref(), Some("secret"));
    }

    #[test]
    fn min_size_grows_with_rows() {
        let one = provider("line").min_size();
        let two = provider("line\nline").min_size();
        assert_eq!(one.width, two.width);
        assert!(two.height > one.height);
    }

    #[test]
    fn min_size_tracks_widest_row() {
        let narrow = provider("ab\ncd").min_size();
        let wide = provider("ab\ncdefgh").min_size();
        assert!(wide.width > narrow.width);
        assert_eq!(wide.height, narrow.height);
    }
}
