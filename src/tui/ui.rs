use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    ChatPanel, ContactPanel, Credentials, Hero, JourneyView, ProjectDetail, ProjectsGrid,
    TechTicker, TitleBar,
};
use crate::tui::{Section, TuiState};

/// Hero cursor blink half-period.
const BLINK: Duration = Duration::from_millis(530);
/// Time for the plane to fly the whole route once.
const FLIGHT_PERIOD: Duration = Duration::from_secs(12);

const CHAT_MIN_WIDTH: u16 = 40;
const CHAT_MIN_HEIGHT: u16 = 12;

/// The chat overlay's rectangle: anchored to the bottom-right of `body`.
pub fn chat_area(body: Rect) -> Rect {
    let width = (body.width * 2 / 5).max(CHAT_MIN_WIDTH).min(body.width);
    let height = (body.height * 3 / 4).max(CHAT_MIN_HEIGHT).min(body.height);
    Rect::new(
        body.x + body.width - width,
        body.y + body.height - height,
        width,
        height,
    )
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, body, ticker_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let content = &app.content;
    TitleBar::new(&content.hero.name, tui.section, &app.status_message).render(frame, title_area);

    let elapsed = tui.start_time.elapsed();
    match tui.section {
        Section::Hero => Hero {
            name: &content.hero.name,
            display_text: app.typewriter.display_text(),
            tagline: &content.hero.tagline,
            cursor_visible: (elapsed.as_millis() / BLINK.as_millis()) % 2 == 0,
        }
        .render(frame, body),
        Section::Journey => {
            let active = app.journey.active_id();
            JourneyView {
                locations: &content.locations,
                active_id: active.as_deref(),
                plane_progress: elapsed.as_secs_f64() / FLIGHT_PERIOD.as_secs_f64() % 1.0,
                layout: &mut tui.journey_layout,
            }
            .render(frame, body);
        }
        Section::Projects => {
            ProjectsGrid {
                projects: &content.projects,
                state: &mut tui.projects,
            }
            .render(frame, body);
            if tui.projects.detail_open
                && let Some(project) = content.projects.get(tui.projects.selected)
            {
                ProjectDetail { project }.render(frame, body);
            }
        }
        Section::Credentials => Credentials {
            skills: &content.skills,
            resume_path: &content.resume_path,
        }
        .render(frame, body),
        Section::Contact => ContactPanel {
            contact: &content.contact,
            name: &content.hero.name,
        }
        .render(frame, body),
    }

    tui.ticker_area = ticker_area;
    TechTicker {
        items: &content.tech_ticker,
        offset: tui.ticker_offset,
    }
    .render(frame, ticker_area);

    if tui.chat_open {
        ChatPanel {
            state: &mut tui.chat_panel,
            input: &mut tui.input_box,
            messages: app.chat.messages(),
            is_busy: app.chat.is_busy(),
        }
        .render(frame, chat_area(body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_chat_area_anchors_bottom_right() {
        let body = Rect::new(0, 1, 100, 40);
        let area = chat_area(body);
        assert_eq!(area.right(), body.right());
        assert_eq!(area.bottom(), body.bottom());
        assert_eq!(area.width, 40);
        assert_eq!(area.height, 30);
    }

    #[test]
    fn test_chat_area_fits_small_terminal() {
        let body = Rect::new(0, 0, 30, 8);
        assert_eq!(chat_area(body), body);
    }

    #[test]
    fn test_each_section_renders() {
        let app = test_app();
        let mut tui = TuiState::new(app.content.projects.len());

        tui.section = Section::Hero;
        assert!(screen(&app, &mut tui).contains("PORTFOLIO_V2.0"));

        tui.section = Section::Journey;
        let text = screen(&app, &mut tui);
        assert!(text.contains("Global Footprint"));
        assert!(text.contains("DATA: WAITING"));
        assert_eq!(tui.journey_layout.beacons.len(), app.content.locations.len());

        tui.section = Section::Projects;
        assert!(screen(&app, &mut tui).contains(&app.content.projects[0].title));

        tui.section = Section::Credentials;
        assert!(screen(&app, &mut tui).contains("Resume & Skillset"));

        tui.section = Section::Contact;
        assert!(screen(&app, &mut tui).contains("Ready to collaborate?"));
    }

    #[test]
    fn test_chat_overlay_shows_greeting() {
        let app = test_app();
        let mut tui = TuiState::new(app.content.projects.len());
        assert!(!screen(&app, &mut tui).contains("AI_LINK::ACTIVE"));

        tui.chat_open = true;
        let text = screen(&app, &mut tui);
        assert!(text.contains("AI_LINK::ACTIVE"));
        assert!(text.contains("Execute command..."));
    }

    #[test]
    fn test_ticker_area_recorded() {
        let app = test_app();
        let mut tui = TuiState::new(app.content.projects.len());
        screen(&app, &mut tui);
        assert_eq!(tui.ticker_area, Rect::new(0, 35, 120, 1));
    }
}
