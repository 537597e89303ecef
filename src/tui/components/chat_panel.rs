//! # ChatPanel Component
//!
//! The assistant overlay: header with link status, a scrollable transcript
//! and the command input.
//!
//! `ChatPanel` is transient (created each frame) and wraps
//! `&'a mut ChatPanelState` (persistent scroll state) plus the transcript
//! and busy flag as props. Heights are measured with
//! [`Message::calculate_height`] before the scroll canvas is sized.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::inference::ChatMessage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::input_box::{INPUT_HEIGHT, InputBox};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Scroll state for the transcript. Persisted in the parent TuiState.
pub struct ChatPanelState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Message heights measured during the last render
    pub heights: Vec<u16>,
}

impl Default for ChatPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanelState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            heights: Vec::new(),
        }
    }

    fn max_offset(&self) -> u16 {
        let total: u16 = self.heights.iter().sum();
        total.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for ChatPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

pub struct ChatPanel<'a> {
    pub state: &'a mut ChatPanelState,
    pub input: &'a mut InputBox,
    pub messages: &'a [ChatMessage],
    pub is_busy: bool,
}

impl<'a> ChatPanel<'a> {
    fn header(&self) -> Line<'static> {
        let (dot, status) = if self.is_busy {
            (Color::Yellow, "AI_LINK::TRANSMITTING")
        } else {
            (Color::Green, "AI_LINK::ACTIVE")
        };
        Line::from(vec![
            Span::styled("● ", Style::default().fg(dot)),
            Span::styled(
                status,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [Esc] close", Style::default().fg(Color::DarkGray)),
        ])
    }

    fn render_transcript(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar
        self.state.heights = self
            .messages
            .iter()
            .map(|m| Message::calculate_height(m, content_width))
            .collect();
        let total_height: u16 = self.state.heights.iter().sum();

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0u16;
        for (message, &height) in self.messages.iter().zip(self.state.heights.iter()) {
            scroll_view.render_widget(Message::new(message), Rect::new(0, y, content_width, height));
            y += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl<'a> Component for ChatPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Rgb(10, 10, 10)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [header, transcript, input] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(self.header()), header);
        self.render_transcript(frame, transcript);

        self.input.locked = self.is_busy;
        self.input.render(frame, input);
    }
}
