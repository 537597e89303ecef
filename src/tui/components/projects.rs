//! # Projects Component
//!
//! A two-column grid of project cards with keyboard and mouse selection.
//! Enter (or a click on the selected card) opens a detail modal; Esc closes
//! it.
//!
//! `ProjectsState` persists in `TuiState`; `ProjectsGrid` and
//! `ProjectDetail` are created fresh each frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::content::Project;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectsEvent {
    SelectionChanged(usize),
    Opened(usize),
    Closed,
}

#[derive(Debug, Default)]
pub struct ProjectsState {
    pub selected: usize,
    pub detail_open: bool,
    /// Number of projects, refreshed every render.
    pub count: usize,
    /// Card rectangles from the last render, for hit testing.
    pub cards: Vec<Rect>,
}

impl ProjectsState {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    fn select(&mut self, index: usize) -> Option<ProjectsEvent> {
        if index >= self.count || index == self.selected {
            return None;
        }
        self.selected = index;
        Some(ProjectsEvent::SelectionChanged(index))
    }

    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.cards.iter().position(|r| r.contains(pos))
    }
}

impl EventHandler for ProjectsState {
    type Event = ProjectsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.detail_open {
            return match event {
                TuiEvent::Escape | TuiEvent::Submit => {
                    self.detail_open = false;
                    Some(ProjectsEvent::Closed)
                }
                _ => None,
            };
        }
        if self.count == 0 {
            return None;
        }
        match event {
            TuiEvent::CursorLeft => self.select(self.selected.checked_sub(1)?),
            TuiEvent::CursorRight => self.select(self.selected + 1),
            TuiEvent::CursorUp => self.select(self.selected.checked_sub(COLUMNS)?),
            TuiEvent::CursorDown => self.select(self.selected + COLUMNS),
            TuiEvent::Submit => {
                self.detail_open = true;
                Some(ProjectsEvent::Opened(self.selected))
            }
            TuiEvent::MouseClick(col, row) => {
                let hit = self.card_at(*col, *row)?;
                if hit == self.selected {
                    self.detail_open = true;
                    Some(ProjectsEvent::Opened(hit))
                } else {
                    self.select(hit)
                }
            }
            TuiEvent::MouseMove(col, row) => {
                let hit = self.card_at(*col, *row)?;
                self.select(hit)
            }
            _ => None,
        }
    }
}

fn status_color(project: &Project) -> Color {
    use crate::core::content::ProjectStatus::*;
    match project.status {
        Live => Color::Green,
        Private => Color::Magenta,
        OpenSource => Color::Cyan,
        Research => Color::Yellow,
    }
}

pub struct ProjectsGrid<'a> {
    pub projects: &'a [Project],
    pub state: &'a mut ProjectsState,
}

impl<'a> ProjectsGrid<'a> {
    fn card(project: &'a Project, selected: bool) -> Paragraph<'a> {
        let border = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(
                format!(" {} ", project.path),
                Style::default().fg(Color::DarkGray),
            ))
            .padding(Padding::horizontal(1));

        let lines = vec![
            Line::styled(
                project.title.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::from(vec![
                Span::styled(project.role.as_str(), Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", project.status.label()),
                    Style::default().fg(status_color(project)),
                ),
            ]),
            Line::default(),
            Line::styled(project.summary.as_str(), Style::default().fg(Color::Gray)),
            Line::default(),
            Line::styled(
                project.tech_stack.join(" · "),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true })
    }
}

impl<'a> Component for ProjectsGrid<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.count = self.projects.len();
        if self.state.selected >= self.state.count {
            self.state.selected = self.state.count.saturating_sub(1);
        }

        let [header, grid] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("02. ", Style::default().fg(Color::Yellow)),
                Span::styled("Projects", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    "   ←/→/↑/↓ select · Enter details",
                    Style::default().fg(Color::DarkGray),
                ),
            ])),
            header,
        );

        let rows = self.projects.len().div_ceil(COLUMNS).max(1);
        let row_areas = Layout::vertical(vec![Constraint::Fill(1); rows]).split(grid);
        self.state.cards.clear();
        for (i, project) in self.projects.iter().enumerate() {
            let row = row_areas[i / COLUMNS];
            let cols = Layout::horizontal(vec![Constraint::Fill(1); COLUMNS]).split(row);
            let rect = cols[i % COLUMNS];
            frame.render_widget(Self::card(project, i == self.state.selected), rect);
            self.state.cards.push(rect);
        }
    }
}

/// Centered modal with a project's full details.
pub struct ProjectDetail<'a> {
    pub project: &'a Project,
}

impl<'a> ProjectDetail<'a> {
    fn lines(&self) -> Vec<Line<'a>> {
        let p = self.project;
        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::styled(
                p.title.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::from(vec![
                Span::styled(p.role.as_str(), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  // {} Build", p.status.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::default(),
            Line::styled("Project Overview", heading),
            Line::raw(p.long_description.as_str()),
            Line::default(),
            Line::styled("Key Features", heading),
        ];
        lines.extend(p.features.iter().map(|f| {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::raw(f.as_str()),
            ])
        }));

        if !p.metrics.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled("Metrics", heading));
            lines.extend(p.metrics.iter().map(|(k, v)| {
                Line::from(vec![
                    Span::styled(format!("{k}: "), Style::default().fg(Color::DarkGray)),
                    Span::styled(v.as_str(), Style::default().fg(Color::Green)),
                ])
            }));
        }

        lines.push(Line::default());
        lines.push(Line::styled("Dependencies", heading));
        lines.push(Line::raw(p.tech_stack.join(", ")));

        if let Some(live) = &p.links.live {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("DEPLOY_TO_PROD  ", Style::default().fg(Color::Yellow)),
                Span::raw(live.as_str()),
            ]));
        }
        if let Some(github) = &p.links.github {
            if p.links.live.is_none() {
                lines.push(Line::default());
            }
            lines.push(Line::from(vec![
                Span::styled("SOURCE_CODE     ", Style::default().fg(Color::Cyan)),
                Span::raw(github.as_str()),
            ]));
        }
        lines
    }
}

/// Returns a rectangle of the given percentage size centered in `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    rect
}

impl<'a> Component for ProjectDetail<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let modal = centered(area, 80, 85);
        frame.render_widget(Clear, modal);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", self.project.path))
            .title_bottom(Line::styled(" Esc close ", Style::default().fg(Color::DarkGray)))
            .padding(Padding::horizontal(1));
        frame.render_widget(
            Paragraph::new(self.lines())
                .block(block)
                .wrap(Wrap { trim: true }),
            modal,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PortfolioContent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state() -> ProjectsState {
        ProjectsState::new(4)
    }

    #[test]
    fn test_arrow_navigation() {
        let mut s = state();
        assert_eq!(
            s.handle_event(&TuiEvent::CursorRight),
            Some(ProjectsEvent::SelectionChanged(1))
        );
        assert_eq!(
            s.handle_event(&TuiEvent::CursorDown),
            Some(ProjectsEvent::SelectionChanged(3))
        );
        assert_eq!(s.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(
            s.handle_event(&TuiEvent::CursorUp),
            Some(ProjectsEvent::SelectionChanged(1))
        );
        assert_eq!(
            s.handle_event(&TuiEvent::CursorLeft),
            Some(ProjectsEvent::SelectionChanged(0))
        );
        assert_eq!(s.handle_event(&TuiEvent::CursorLeft), None);
    }

    #[test]
    fn test_enter_opens_escape_closes() {
        let mut s = state();
        s.handle_event(&TuiEvent::CursorRight);
        assert_eq!(
            s.handle_event(&TuiEvent::Submit),
            Some(ProjectsEvent::Opened(1))
        );
        assert!(s.detail_open);
        // Navigation is frozen while the modal is open
        assert_eq!(s.handle_event(&TuiEvent::CursorRight), None);
        assert_eq!(s.handle_event(&TuiEvent::Escape), Some(ProjectsEvent::Closed));
        assert!(!s.detail_open);
    }

    #[test]
    fn test_render_grid_records_cards() {
        let content = PortfolioContent::default();
        let mut s = ProjectsState::default();
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ProjectsGrid {
                    projects: &content.projects,
                    state: &mut s,
                }
                .render(f, f.area());
            })
            .unwrap();

        assert_eq!(s.count, 4);
        assert_eq!(s.cards.len(), 4);
        let second = s.cards[1];
        assert_eq!(s.card_at(second.x + 1, second.y + 1), Some(1));

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Objection Builder"));
        assert!(text.contains("[Open Source]"));
    }

    #[test]
    fn test_click_selects_then_opens() {
        let mut s = state();
        s.cards = vec![
            Rect::new(0, 0, 10, 5),
            Rect::new(10, 0, 10, 5),
            Rect::new(0, 5, 10, 5),
            Rect::new(10, 5, 10, 5),
        ];
        assert_eq!(
            s.handle_event(&TuiEvent::MouseClick(12, 6)),
            Some(ProjectsEvent::SelectionChanged(3))
        );
        assert_eq!(
            s.handle_event(&TuiEvent::MouseClick(12, 6)),
            Some(ProjectsEvent::Opened(3))
        );
    }

    #[test]
    fn test_detail_lists_features_and_links() {
        let content = PortfolioContent::default();
        let detail = ProjectDetail {
            project: &content.projects[0],
        };
        let text: Vec<String> = detail.lines().iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l == "Project Overview"));
        assert!(text.iter().any(|l| l == "> Web Adapter Architecture"));
        assert!(text.iter().any(|l| l.contains("costReduction: 99%")));
        assert!(text.iter().any(|l| l.contains("https://www.objectionbuilder.com")));
    }

    #[test]
    fn test_detail_modal_renders() {
        let content = PortfolioContent::default();
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ProjectDetail {
                    project: &content.projects[3],
                }
                .render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Sea Turtle Segmentation"));
        assert!(text.contains("Research Build"));
    }
}
