use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::content::Contact;
use crate::tui::component::Component;

/// Closing call to action with the contact links.
pub struct ContactPanel<'a> {
    pub contact: &'a Contact,
    pub name: &'a str,
}

impl<'a> ContactPanel<'a> {
    fn links(&self) -> Vec<Line<'a>> {
        let label = |text: &'static str, color: Color| {
            Span::styled(format!("{text:<10}"), Style::default().fg(color))
        };
        let mut lines = Vec::new();
        if let Some(github) = &self.contact.github {
            lines.push(Line::from(vec![label("GITHUB", Color::Cyan), Span::raw(github.as_str())]));
        }
        if let Some(linkedin) = &self.contact.linkedin {
            lines.push(Line::from(vec![
                label("LINKEDIN", Color::Blue),
                Span::raw(linkedin.as_str()),
            ]));
        }
        lines.push(Line::from(vec![
            label("EMAIL", Color::Yellow),
            Span::raw(self.contact.email.as_str()),
        ]));
        lines
    }
}

impl<'a> Component for ContactPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let links = self.links();
        let [_, title, _, pitch, _, list, _, footer] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(links.len() as u16),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::styled(
                "Ready to collaborate?",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            title,
        );
        frame.render_widget(
            Paragraph::new(self.contact.pitch.as_str())
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            pitch,
        );

        let width = links.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(ratatui::layout::Flex::Center)
            .areas(list);
        frame.render_widget(Paragraph::new(links), column);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Designed & Coded by ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.name),
            ]))
            .alignment(Alignment::Center),
            footer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PortfolioContent;

    #[test]
    fn test_links_skip_missing_profiles() {
        let mut content = PortfolioContent::default();
        content.contact.linkedin = None;
        let panel = ContactPanel {
            contact: &content.contact,
            name: "x",
        };
        let lines: Vec<String> = panel.links().iter().map(|l| l.to_string()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("GITHUB"));
        assert!(lines[1].contains(&content.contact.email));
    }
}
