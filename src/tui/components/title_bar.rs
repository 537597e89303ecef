//! # TitleBar Component
//!
//! Top status bar: portfolio name, section tabs and the AI link status.
//!
//! Purely presentational. All three props come from different places:
//! - `name`: portfolio content
//! - `active`: TUI state (current section)
//! - `status_message`: core App state (chat link status)
//!
//! ```text
//! ZIYI WANG │ HOME  JOURNEY  PROJECTS  RESUME  CONTACT │ AI_LINK::READY
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::Section;
use crate::tui::component::Component;

const SEPARATOR: &str = " │ ";

pub struct TitleBar<'a> {
    pub name: &'a str,
    pub active: Section,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(name: &'a str, active: Section, status_message: &'a str) -> Self {
        Self {
            name,
            active,
            status_message,
        }
    }

    fn line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled(
                self.name.to_uppercase(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(SEPARATOR),
        ];

        for (i, section) in Section::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if *section == self.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(section.label(), style));
        }

        if !self.status_message.is_empty() {
            spans.push(Span::raw(SEPARATOR));
            spans.push(Span::styled(
                self.status_message,
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}
