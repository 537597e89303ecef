//! # Application State
//!
//! Core business state for Folio. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn CompletionProvider>  // Gemini (or a test double)
//! ├── content: Arc<PortfolioContent>         // read-only portfolio data
//! ├── typewriter: Typewriter                 // hero role rotation
//! ├── chat: ChatSession                      // transcript + in-flight request
//! ├── journey: Journey                       // shared map/legend hover
//! ├── status_message: String                 // status bar text
//! ├── model_name: String                     // Gemini model id
//! └── system_prompt: String                  // persona sent with every request
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::Instant;

use crate::core::chat::ChatSession;
use crate::core::config::ResolvedConfig;
use crate::core::content::PortfolioContent;
use crate::core::rotator::{RoleCycle, RotatorError, Typewriter, TypewriterTiming};
use crate::core::selection::{ActiveSelection, HoverSync, LocationSet};
use crate::inference::CompletionProvider;

/// The journey screen's two hover consumers, bound to one lifted selection.
#[derive(Debug)]
pub struct Journey {
    pub selection: ActiveSelection,
    pub map: HoverSync,
    pub legend: HoverSync,
}

impl Journey {
    pub fn new(content: &PortfolioContent) -> Self {
        let set = LocationSet::from_locations(&content.locations);
        let selection = ActiveSelection::new();
        Self {
            map: HoverSync::controlled(set.clone(), selection.clone()),
            legend: HoverSync::controlled(set, selection.clone()),
            selection,
        }
    }

    pub fn active_id(&self) -> Option<String> {
        self.selection.get()
    }
}

pub struct App {
    pub provider: Arc<dyn CompletionProvider>,
    pub content: Arc<PortfolioContent>,
    pub typewriter: Typewriter,
    pub chat: ChatSession,
    pub journey: Journey,
    pub status_message: String,
    pub model_name: String,
    pub system_prompt: String,
}

impl App {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        content: PortfolioContent,
        model_name: String,
        system_prompt: String,
        timing: TypewriterTiming,
        now: Instant,
    ) -> Result<Self, RotatorError> {
        let cycle = RoleCycle::new(content.hero.roles.clone())?;
        let journey = Journey::new(&content);
        Ok(Self {
            provider,
            typewriter: Typewriter::start(cycle, timing, now),
            chat: ChatSession::default(),
            journey,
            content: Arc::new(content),
            status_message: String::from("AI_LINK::READY"),
            model_name,
            system_prompt,
        })
    }

    pub fn from_config(
        provider: Arc<dyn CompletionProvider>,
        content: PortfolioContent,
        config: &ResolvedConfig,
        now: Instant,
    ) -> Result<Self, RotatorError> {
        Self::new(
            provider,
            content,
            config.model_name.clone(),
            config.system_prompt.clone(),
            config.timing,
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "AI_LINK::READY");
        assert!(!app.chat.is_busy());
        assert_eq!(app.model_name, "test-model");
        assert_eq!(app.typewriter.display_text(), "");
        assert_eq!(app.journey.active_id(), None);
    }

    #[test]
    fn test_journey_consumers_are_controlled() {
        let mut app = test_app();
        assert!(app.journey.map.is_controlled());
        assert!(app.journey.legend.is_controlled());
        app.journey.legend.set_active(Some("canada"));
        assert_eq!(app.journey.map.active().as_deref(), Some("canada"));
    }
}
