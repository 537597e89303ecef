//! # Journey Component
//!
//! Two-zone screen sharing one hover selection:
//!
//! ```text
//! ┌ 01. Journey ──────┐┌ MAP ─────────────────────────────────┐
//! │ LOC: AUSTRALIA    ││      ◇ ·  ·  ·                       │
//! │ Sydney            ││   ·          ·        ◇               │
//! │ AU                ││  ·   ✈         ·                      │
//! │ ▌UNSW Sydney      ││                 ·   ·     ◆ Sydney    │
//! │ ● China   Origin  ││                                       │
//! │ SYS.STATUS: ONLINE││                                       │
//! └───────────────────┘└───────────────────────────────────────┘
//!        35 %                           65 %
//! ```
//!
//! The map projects location coordinates (`x ∈ [0,1000]`, `y ∈ [0,500]`)
//! onto a ratatui `Canvas`. Beacon and legend cells are recorded in
//! [`JourneyLayout`] during render so the event loop can hit-test mouse
//! positions without recomputing the layout.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::action::HoverSource;
use crate::core::content::{Location, MAP_HEIGHT, MAP_WIDTH};
use crate::tui::component::Component;

/// Samples per flight leg.
const LEG_SAMPLES: usize = 24;
/// How far a leg bows away from the straight line, relative to its length.
const ARC_BOW: f64 = 0.3;

/// Stylised continent outlines in map coordinates.
const CONTINENTS: &[&[(f64, f64)]] = &[
    &[(50.0, 70.0), (150.0, 50.0), (250.0, 50.0), (320.0, 100.0), (280.0, 180.0), (200.0, 220.0), (100.0, 150.0)],
    &[(220.0, 240.0), (300.0, 240.0), (350.0, 300.0), (320.0, 450.0), (250.0, 400.0)],
    &[(400.0, 100.0), (500.0, 60.0), (700.0, 60.0), (850.0, 80.0), (900.0, 150.0), (800.0, 250.0), (700.0, 280.0), (600.0, 200.0), (500.0, 180.0), (450.0, 150.0)],
    &[(450.0, 200.0), (550.0, 200.0), (600.0, 280.0), (550.0, 400.0), (480.0, 350.0), (440.0, 250.0)],
    &[(780.0, 330.0), (880.0, 330.0), (900.0, 400.0), (800.0, 420.0), (770.0, 380.0)],
];

/// Screen regions recorded by the last render, for hit testing.
#[derive(Debug, Default, Clone)]
pub struct JourneyLayout {
    pub area: Rect,
    pub map: Rect,
    pub beacons: Vec<(String, Rect)>,
    pub legend: Vec<(String, Rect)>,
}

impl JourneyLayout {
    /// Maps a mouse position to a hover update.
    ///
    /// Beacons report from the map, legend rows from the legend. Anywhere
    /// else on the journey screen clears the selection. Positions outside
    /// the screen return `None`.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(HoverSource, Option<String>)> {
        let pos = Position::new(column, row);
        if !self.area.contains(pos) {
            return None;
        }
        if let Some((id, _)) = self.beacons.iter().find(|(_, r)| r.contains(pos)) {
            return Some((HoverSource::Map, Some(id.clone())));
        }
        if let Some((id, _)) = self.legend.iter().find(|(_, r)| r.contains(pos)) {
            return Some((HoverSource::Legend, Some(id.clone())));
        }
        Some((HoverSource::Map, None))
    }
}

/// Projects map coordinates onto a cell of `inner`, matching how `Canvas`
/// places printed labels.
pub fn project(x: f64, y: f64, inner: Rect) -> (u16, u16) {
    let cols = f64::from(inner.width.saturating_sub(1));
    let rows = f64::from(inner.height.saturating_sub(1));
    let col = (x.clamp(0.0, MAP_WIDTH) * cols / MAP_WIDTH) as u16;
    let row = (y.clamp(0.0, MAP_HEIGHT) * rows / MAP_HEIGHT) as u16;
    (inner.x + col, inner.y + row)
}

fn beacon_rect(x: f64, y: f64, inner: Rect) -> Rect {
    let (col, row) = project(x, y, inner);
    let left = col.saturating_sub(1).max(inner.x);
    let right = (col + 2).min(inner.x + inner.width);
    Rect::new(left, row, right.saturating_sub(left), 1)
}

/// Canvas y grows upwards; map y grows downwards.
fn flip(y: f64) -> f64 {
    MAP_HEIGHT - y
}

fn quad(a: (f64, f64), c: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    (
        u * u * a.0 + 2.0 * u * t * c.0 + t * t * b.0,
        u * u * a.1 + 2.0 * u * t * c.1 + t * t * b.1,
    )
}

/// The closed route through every location in dataset order, as sampled
/// points in map coordinates.
pub fn flight_path(locations: &[Location]) -> Vec<(f64, f64)> {
    if locations.len() < 2 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(locations.len() * LEG_SAMPLES + 1);
    for (i, from) in locations.iter().enumerate() {
        let to = &locations[(i + 1) % locations.len()];
        let a = (from.x, from.y);
        let b = (to.x, to.y);
        // Alternate the bow so consecutive legs don't overlap.
        let side = if i % 2 == 0 { -1.0 } else { 1.0 };
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let control = (
            (a.0 + b.0) / 2.0 - dy * ARC_BOW * side,
            (a.1 + b.1) / 2.0 + dx * ARC_BOW * side,
        );
        let start = if i == 0 { 0 } else { 1 };
        for s in start..=LEG_SAMPLES {
            let t = s as f64 / LEG_SAMPLES as f64;
            let (x, y) = quad(a, control, b, t);
            points.push((x.clamp(0.0, MAP_WIDTH), y.clamp(0.0, MAP_HEIGHT)));
        }
    }
    points
}

fn location_color(location: &Location) -> Color {
    let (r, g, b) = location.rgb();
    Color::Rgb(r, g, b)
}

pub struct JourneyView<'a> {
    pub locations: &'a [Location],
    pub active_id: Option<&'a str>,
    /// Position of the plane along the route, `0.0..1.0`.
    pub plane_progress: f64,
    pub layout: &'a mut JourneyLayout,
}

impl<'a> JourneyView<'a> {
    fn active(&self) -> Option<&'a Location> {
        let id = self.active_id?;
        self.locations.iter().find(|l| l.id == id)
    }

    fn info_lines(&self) -> Vec<Line<'a>> {
        match self.active() {
            Some(loc) => {
                let color = location_color(loc);
                vec![
                    Line::styled(
                        format!("LOC: {}", loc.id.to_uppercase()),
                        Style::default().fg(color),
                    ),
                    Line::styled(
                        loc.headline(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(loc.subtitle(), Style::default().fg(Color::Gray)),
                    Line::default(),
                    Line::from(vec![
                        Span::styled("▌", Style::default().fg(color)),
                        Span::styled(loc.role.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                    Line::from(vec![
                        Span::styled("▌", Style::default().fg(color)),
                        Span::styled(loc.year.as_str(), Style::default().fg(Color::DarkGray)),
                    ]),
                    Line::default(),
                    Line::styled(loc.description.as_str(), Style::default().fg(Color::Gray)),
                ]
            }
            None => vec![
                Line::styled(
                    "Global Footprint",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Line::default(),
                Line::styled(
                    "Hover over the beacon nodes on the map to retrieve chronological data logs.",
                    Style::default().fg(Color::DarkGray),
                ),
            ],
        }
    }

    fn render_info(&mut self, frame: &mut Frame, area: Rect) {
        let border = self
            .active()
            .map(location_color)
            .unwrap_or(Color::DarkGray);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Line::from(vec![
                Span::styled(" 01. ", Style::default().fg(Color::Yellow)),
                Span::styled("Journey ", Style::default().add_modifier(Modifier::BOLD)),
            ]));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let legend_height = self.locations.len() as u16;
        let [body, _, legend, status] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(legend_height),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(self.info_lines()).wrap(Wrap { trim: true }),
            body,
        );

        self.layout.legend.clear();
        for (i, loc) in self.locations.iter().enumerate() {
            let row = legend.y + i as u16;
            if row >= legend.y + legend.height {
                break;
            }
            let rect = Rect::new(legend.x, row, legend.width, 1);
            let is_active = self.active_id == Some(loc.id.as_str());
            let marker = if is_active { "● " } else { "○ " };
            let name_style = if is_active {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(location_color(loc))),
                Span::styled(format!("{:<10}", loc.headline()), name_style),
                Span::styled(loc.year.as_str(), Style::default().fg(Color::DarkGray)),
            ]);
            frame.render_widget(Paragraph::new(line), rect);
            self.layout.legend.push((loc.id.clone(), rect));
        }

        let data = if self.active().is_some() {
            "DATA: FOUND"
        } else {
            "DATA: WAITING"
        };
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(data.len() as u16)])
                .areas(status);
        let dim = Style::default().fg(Color::DarkGray);
        frame.render_widget(Paragraph::new(Span::styled("SYS.STATUS: ONLINE", dim)), left);
        frame.render_widget(Paragraph::new(Span::styled(data, dim)), right);
    }

    fn render_map(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" MAP ");
        let inner = block.inner(area);

        let path = flight_path(self.locations);
        let plane = if path.is_empty() {
            None
        } else {
            let idx = (self.plane_progress.rem_euclid(1.0) * (path.len() - 1) as f64) as usize;
            path.get(idx).copied()
        };
        let land = if self.active_id.is_some() {
            Color::Rgb(40, 40, 40)
        } else {
            Color::Rgb(70, 70, 70)
        };
        let locations = self.locations;
        let active_id = self.active_id;

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, MAP_WIDTH])
            .y_bounds([0.0, MAP_HEIGHT])
            .paint(move |ctx| {
                for outline in CONTINENTS {
                    for (i, &(x1, y1)) in outline.iter().enumerate() {
                        let (x2, y2) = outline[(i + 1) % outline.len()];
                        ctx.draw(&CanvasLine::new(x1, flip(y1), x2, flip(y2), land));
                    }
                }
                ctx.layer();

                for (i, pair) in path.windows(2).enumerate() {
                    // Dashed route
                    if i % 2 == 0 {
                        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                        ctx.draw(&CanvasLine::new(x1, flip(y1), x2, flip(y2), Color::Rgb(0, 120, 128)));
                    }
                }
                ctx.layer();

                if let Some((x, y)) = plane {
                    ctx.print(x, flip(y), Span::styled("✈", Style::default().fg(Color::White)));
                }
                for loc in locations {
                    let color = location_color(loc);
                    if active_id == Some(loc.id.as_str()) {
                        ctx.print(
                            loc.x,
                            flip(loc.y),
                            Line::from(vec![
                                Span::styled("◆ ", Style::default().fg(color)),
                                Span::styled(
                                    loc.headline().to_string(),
                                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                                ),
                            ]),
                        );
                    } else {
                        ctx.print(loc.x, flip(loc.y), Span::styled("◇", Style::default().fg(color)));
                    }
                }
            });
        frame.render_widget(canvas, area);

        self.layout.map = inner;
        self.layout.beacons = self
            .locations
            .iter()
            .map(|l| (l.id.clone(), beacon_rect(l.x, l.y, inner)))
            .collect();
    }
}

impl<'a> Component for JourneyView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [info, map] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(area);
        self.layout.area = area;
        self.render_info(frame, info);
        self.render_map(frame, map);
    }
}
