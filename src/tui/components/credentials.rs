//! # Credentials Component
//!
//! Resume location plus gauges for the top skills.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Gauge, Padding, Paragraph, Wrap};

use crate::core::content::{Skill, SkillCategory};
use crate::tui::component::Component;

/// Number of skills shown as gauges.
pub const TOP_SKILLS: usize = 5;

fn category_label(category: SkillCategory) -> &'static str {
    match category {
        SkillCategory::Frontend => "Frontend",
        SkillCategory::Backend => "Backend",
        SkillCategory::AiMl => "AI/ML",
        SkillCategory::Tools => "Tools",
    }
}

pub struct Credentials<'a> {
    pub skills: &'a [Skill],
    pub resume_path: &'a str,
}

impl<'a> Component for Credentials<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header, body] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        frame.render_widget(
            Paragraph::new(vec![
                Line::styled("03. CREDENTIALS", Style::default().fg(Color::Yellow)),
                Line::styled(
                    "Resume & Skillset",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            header,
        );

        let [resume, skills] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);

        let resume_block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" RESUME ")
            .padding(Padding::uniform(1));
        frame.render_widget(
            Paragraph::new(vec![
                Line::styled("Full CV", Style::default().add_modifier(Modifier::BOLD)),
                Line::default(),
                Line::from(vec![
                    Span::styled("path  ", Style::default().fg(Color::DarkGray)),
                    Span::styled(self.resume_path, Style::default().fg(Color::Yellow)),
                ]),
                Line::default(),
                Line::styled(
                    "Open the file above in any PDF viewer for the complete history.",
                    Style::default().fg(Color::Gray),
                ),
            ])
            .block(resume_block)
            .wrap(Wrap { trim: true }),
            resume,
        );

        let skills_block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Core Competencies ")
            .padding(Padding::horizontal(1));
        let inner = skills_block.inner(skills);
        frame.render_widget(skills_block, skills);

        let shown: Vec<&Skill> = self.skills.iter().take(TOP_SKILLS).collect();
        let rows = Layout::vertical(vec![Constraint::Length(2); shown.len()]).split(inner);
        for (skill, row) in shown.into_iter().zip(rows.iter()) {
            let [label, bar] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(*row);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(skill.name.as_str(), Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("  {}", category_label(skill.category)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])),
                label,
            );
            frame.render_widget(
                Gauge::default()
                    .gauge_style(Style::default().fg(Color::Yellow).bg(Color::Rgb(20, 20, 20)))
                    .percent(u16::from(skill.level.min(100)))
                    .label(format!("{}%", skill.level)),
                bar,
            );
        }
    }
}
