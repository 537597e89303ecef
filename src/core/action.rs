//! # Actions
//!
//! Everything that can happen in Folio becomes an `Action`.
//! User presses Enter in the chat? That's `Action::Submit`.
//! Gemini streams a token? That's `Action::ResponseChunk { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing any I/O the caller must perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```

use std::time::Instant;

use log::{debug, info, warn};

use crate::core::chat::{OutboundRequest, RequestId};
use crate::core::state::App;

/// Which journey view reported a hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverSource {
    Map,
    Legend,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The chat input text changed.
    InputChanged(String),
    /// Send the pending chat input.
    Submit,
    ResponseChunk { id: RequestId, text: String },
    ResponseDone { id: RequestId },
    ResponseFailed { id: RequestId, error: String },
    /// User aborted the in-flight request.
    CancelGeneration,
    Hover { source: HoverSource, id: Option<String> },
    HoverNext,
    HoverPrev,
    /// A scheduled deadline may have passed.
    Tick(Instant),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Visible state changed without any I/O to perform.
    Redraw,
    Quit,
    SpawnRequest(OutboundRequest),
    CancelRequest(RequestId),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::InputChanged(text) => {
            app.chat.set_pending_input(text);
            Effect::None
        }
        Action::Submit => match app.chat.submit_pending() {
            Some(request) => {
                app.status_message = String::from("AI_LINK::TRANSMITTING");
                Effect::SpawnRequest(request)
            }
            None => Effect::None,
        },
        Action::ResponseChunk { id, text } => {
            if app.chat.apply_chunk(id, &text) {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::ResponseDone { id } => {
            if app.chat.finish(id) {
                app.status_message = String::from("AI_LINK::ACTIVE");
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::ResponseFailed { id, error } => {
            if app.chat.fail(id) {
                warn!("Request {} failed: {}", id.value(), error);
                app.status_message = String::from("AI_LINK::UNSTABLE");
                Effect::Redraw
            } else {
                debug!("Ignoring failure for stale request {}: {}", id.value(), error);
                Effect::None
            }
        }
        Action::CancelGeneration => match app.chat.cancel() {
            Some(id) => {
                app.status_message = String::from("AI_LINK::ABORTED");
                Effect::CancelRequest(id)
            }
            None => Effect::None,
        },
        Action::Hover { source, id } => {
            let consumer = match source {
                HoverSource::Map => &mut app.journey.map,
                HoverSource::Legend => &mut app.journey.legend,
            };
            if consumer.set_active(id.as_deref()) {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::HoverNext => redraw_if(app.journey.map.select_next()),
        Action::HoverPrev => redraw_if(app.journey.map.select_prev()),
        Action::Tick(now) => redraw_if(app.typewriter.poll(now)),
        Action::Quit => {
            info!("Quit requested");
            app.typewriter.cancel();
            if let Some(id) = app.chat.cancel() {
                debug!("Abandoning request {} on quit", id.value());
            }
            Effect::Quit
        }
    }
}

fn redraw_if(changed: bool) -> Effect {
    if changed { Effect::Redraw } else { Effect::None }
}
