//! # Hero Component
//!
//! Landing banner: the name, the typewriter role line and the tagline.
//!
//! ```text
//!  ── PORTFOLIO_V2.0
//!  Ziyi Wang.
//!  > Computer Vision Eng█
//!  │ Turning Logic into Intelligence.
//!  [Tab] VIEW_JOURNEY   [Ctrl+A] ASK_THE_AI   [q] EXIT
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::tui::component::Component;

const CURSOR_GLYPH: &str = "█";

pub struct Hero<'a> {
    pub name: &'a str,
    /// Current typewriter prefix.
    pub display_text: &'a str,
    pub tagline: &'a str,
    /// Cursor blink phase.
    pub cursor_visible: bool,
}

impl<'a> Hero<'a> {
    fn role_line(&self) -> Line<'a> {
        let cursor = if self.cursor_visible { CURSOR_GLYPH } else { " " };
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(self.display_text, Style::default().fg(Color::White)),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    }
}

impl<'a> Component for Hero<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let tagline_lines = self.tagline.lines().count().max(1) as u16;
        let [_, badge, _, name, _, role, _, tagline, _, hints, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(tagline_lines),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let indent = |r: Rect| {
            let pad = r.width / 8;
            Rect {
                x: r.x + pad,
                width: r.width.saturating_sub(pad),
                ..r
            }
        };

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("── ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    "PORTFOLIO_V2.0",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ])),
            indent(badge),
        );

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    self.name,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(".", Style::default().fg(Color::Cyan)),
            ])),
            indent(name),
        );

        frame.render_widget(Paragraph::new(self.role_line()), indent(role));

        frame.render_widget(
            Paragraph::new(self.tagline)
                .style(Style::default().fg(Color::Gray))
                .block(
                    Block::default()
                        .borders(Borders::LEFT)
                        .border_style(Style::default().fg(Color::DarkGray))
                        .padding(Padding::left(1)),
                ),
            indent(tagline),
        );

        let key = Style::default().fg(Color::Black).bg(Color::White);
        let label = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Tab ", key),
                Span::styled(" VIEW_JOURNEY   ", label),
                Span::styled(" Ctrl+A ", key),
                Span::styled(" ASK_THE_AI   ", label),
                Span::styled(" q ", key),
                Span::styled(" EXIT", label),
            ]))
            .alignment(Alignment::Left),
            indent(hints),
        );
    }
}
