//! # InputBox Component
//!
//! Single-line command prompt at the bottom of the chat overlay.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter
//! - Refuse edits while `locked` (a request is in flight)
//!
//! The buffer is internal state; `locked` is a prop from the chat session.
//! The parent mirrors the buffer into the session's pending input on every
//! `ContentChanged`.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary, visible_slice};

const PLACEHOLDER: &str = "Execute command...";
const LOCKED_PLACEHOLDER: &str = "Receiving transmission...";
/// Top + bottom borders
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter; carries the current text.
    Submit(String),
    /// Buffer or cursor changed.
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// True while a request is in flight (Prop)
    pub locked: bool,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            locked: false,
            cursor: CursorState::new(),
        }
    }

    /// Clears the buffer after the parent accepted a submit.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    fn inner_width(area: Rect) -> usize {
        area.width.saturating_sub(2) as usize
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = Self::inner_width(area);
        self.cursor.update_scroll(&self.buffer, width);

        let border = if self.locked {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border);

        let paragraph = if self.buffer.is_empty() {
            let hint = if self.locked { LOCKED_PLACEHOLDER } else { PLACEHOLDER };
            Paragraph::new(hint).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(visible_slice(&self.buffer, self.cursor.scroll_col, width))
                .style(Style::default().fg(Color::Cyan))
        };
        frame.render_widget(paragraph.block(block), area);

        if !self.locked && width > 0 {
            let col = self.cursor.column(&self.buffer) - self.cursor.scroll_col;
            frame.set_cursor_position((area.x + 1 + col as u16, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.locked {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self
                .cursor
                .move_left(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorRight => self
                .cursor
                .move_right(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(input: &mut InputBox, width: u16) -> String {
        let backend = TestBackend::new(width, INPUT_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();
        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('a')),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = InputBox::new();
        for c in "ac".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "abc");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");
    }

    #[test]
    fn test_submit_does_not_clear() {
        let mut input = InputBox::new();
        input.buffer = "hello".to_string();
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("hello".to_string()))
        );
        assert_eq!(input.buffer, "hello");
        input.clear();
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("a\nb".to_string()));
        assert_eq!(input.buffer, "a b");
    }

    #[test]
    fn test_locked_ignores_edits() {
        let mut input = InputBox::new();
        input.locked = true;
        assert_eq!(input.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_placeholder_rendering() {
        let mut input = InputBox::new();
        assert!(screen(&mut input, 40).contains(PLACEHOLDER));
        input.locked = true;
        assert!(screen(&mut input, 40).contains(LOCKED_PLACEHOLDER));
    }

    #[test]
    fn test_long_input_scrolls_to_cursor() {
        let mut input = InputBox::new();
        for c in "0123456789abcdef".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        let text = screen(&mut input, 10);
        assert!(text.contains("abcdef"));
        assert!(!text.contains("0123"));
    }
}
