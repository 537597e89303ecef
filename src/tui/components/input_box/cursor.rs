//! Cursor position and horizontal scrolling for the single-line InputBox.
//!
//! `CursorState` owns the cursor byte offset and the first visible display
//! column. Navigation methods take `buffer: &str` explicitly; the text is
//! owned by `InputBox`.

use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible display column
    pub scroll_col: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_col: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_col = 0;
    }

    /// Display column of the cursor within the whole buffer.
    pub fn column(&self, buffer: &str) -> usize {
        UnicodeWidthStr::width(&buffer[..self.pos])
    }

    /// Keeps the cursor inside a viewport `width` columns wide.
    pub fn update_scroll(&mut self, buffer: &str, width: usize) {
        if width == 0 {
            self.scroll_col = 0;
            return;
        }
        let col = self.column(buffer);
        if col < self.scroll_col {
            self.scroll_col = col;
        } else if col >= self.scroll_col + width {
            // Leave the last cell for the cursor itself
            self.scroll_col = col + 1 - width;
        }
    }

    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// The slice of `text` visible from display column `start`, at most `width`
/// columns wide.
pub(super) fn visible_slice(text: &str, start: usize, width: usize) -> &str {
    use unicode_width::UnicodeWidthChar;

    let mut col = 0;
    let mut begin = None;
    let mut end = text.len();
    for (i, ch) in text.char_indices() {
        if begin.is_none() && col >= start {
            begin = Some(i);
        }
        let w = ch.width().unwrap_or(0);
        if let Some(b) = begin {
            let used = UnicodeWidthStr::width(&text[b..i]);
            if used + w > width {
                end = i;
                break;
            }
        }
        col += w;
    }
    match begin {
        Some(b) => &text[b..end],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_boundaries_multibyte() {
        let text = "aé日";
        assert_eq!(next_char_boundary(text, 0), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(next_char_boundary(text, 3), 6);
        assert_eq!(prev_char_boundary(text, 6), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let buffer = "abcdefghij";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.update_scroll(buffer, 4);
        assert_eq!(cursor.scroll_col, 7);

        cursor.pos = 2;
        cursor.update_scroll(buffer, 4);
        assert_eq!(cursor.scroll_col, 2);
    }

    #[test]
    fn test_column_counts_wide_chars() {
        let mut cursor = CursorState::new();
        cursor.pos = "日本".len();
        assert_eq!(cursor.column("日本語"), 4);
    }

    #[test]
    fn test_visible_slice() {
        assert_eq!(visible_slice("abcdefghij", 0, 4), "abcd");
        assert_eq!(visible_slice("abcdefghij", 7, 4), "hij");
        assert_eq!(visible_slice("日本語", 2, 3), "本");
        assert_eq!(visible_slice("abc", 5, 3), "");
    }
}
