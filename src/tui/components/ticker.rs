//! # Tech Ticker
//!
//! One-line marquee scrolling the tech stack. The strip repeats seamlessly;
//! `offset` counts display columns and is advanced by the event loop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::Component;

const SEPARATOR: &str = "   •   ";

/// The repeating unit: every item followed by the separator.
pub fn strip(items: &[String]) -> String {
    items.iter().map(|item| format!("{item}{SEPARATOR}")).collect()
}

/// Width of one repetition of the strip, in terminal columns.
pub fn period(items: &[String]) -> usize {
    UnicodeWidthStr::width(strip(items).as_str())
}

/// The `width` columns visible when the strip is scrolled by `offset`.
///
/// A wide character cut by the left edge is replaced by a space so the
/// window never exceeds `width`.
pub fn window(items: &[String], offset: usize, width: usize) -> String {
    let unit = strip(items);
    let period = UnicodeWidthStr::width(unit.as_str());
    if period == 0 || width == 0 {
        return String::new();
    }

    let mut skip = offset % period;
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in unit.chars().cycle() {
        let w = ch.width().unwrap_or(0);
        if skip > 0 {
            if w > skip {
                // Straddles the left edge
                out.extend(std::iter::repeat_n(' ', w - skip));
                used += w - skip;
                skip = 0;
            } else {
                skip -= w;
            }
            continue;
        }
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
        if used == width {
            break;
        }
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

pub struct TechTicker<'a> {
    pub items: &'a [String],
    pub offset: usize,
}

impl<'a> Component for TechTicker<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = window(self.items, self.offset, area.width as usize);
        frame.render_widget(
            Paragraph::new(text).style(
                Style::default()
                    .fg(Color::Green)
                    .bg(Color::Rgb(8, 8, 8))
                    .add_modifier(Modifier::BOLD),
            ),
            area,
        );
    }
}
