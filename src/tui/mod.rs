//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! The loop runs on the main thread and never blocks longer than the next
//! deadline: the typewriter's next step or the animation frame, whichever
//! is sooner. Each iteration:
//!
//! 1. fires `Action::Tick(now)` so the typewriter can advance,
//! 2. draws,
//! 3. polls crossterm, then drains all pending events,
//! 4. drains background actions (streamed chunks) from the mpsc channel.
//!
//! Network requests run on tokio tasks. Each one gets a `CancellationToken`
//! which Esc (or quitting) triggers.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use tokio_util::sync::CancellationToken;

use crate::core::action::{Action, Effect, HoverSource, update};
use crate::core::chat::OutboundRequest;
use crate::core::config::ResolvedConfig;
use crate::core::content::PortfolioContent;
use crate::core::state::App;
use crate::inference::{
    CompletionProvider, CompletionRequest, GeminiProvider, ProviderError, StreamChunk,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChatPanelState, InputBox, InputEvent, JourneyLayout, ProjectsEvent, ProjectsState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Animation frame interval (~12fps).
const FRAME: Duration = Duration::from_millis(80);
/// Time between ticker steps of one column.
const TICKER_STEP: Duration = Duration::from_millis(120);

/// Top-level screens, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Journey,
    Projects,
    Credentials,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::Journey,
        Section::Projects,
        Section::Credentials,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "HOME",
            Section::Journey => "JOURNEY",
            Section::Projects => "PROJECTS",
            Section::Credentials => "RESUME",
            Section::Contact => "CONTACT",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Section {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Section {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub section: Section,
    pub chat_open: bool,
    // Persistent component states
    pub input_box: InputBox,
    pub chat_panel: ChatPanelState,
    pub projects: ProjectsState,
    pub journey_layout: JourneyLayout,
    // Ticker
    pub ticker_offset: usize,
    pub ticker_area: Rect,
    pub ticker_paused: bool,
    last_ticker_step: Instant,
    // Animation clock
    pub start_time: Instant,
}

impl TuiState {
    pub fn new(project_count: usize) -> Self {
        let now = Instant::now();
        Self {
            section: Section::Hero,
            chat_open: false,
            input_box: InputBox::new(),
            chat_panel: ChatPanelState::new(),
            projects: ProjectsState::new(project_count),
            journey_layout: JourneyLayout::default(),
            ticker_offset: 0,
            ticker_area: Rect::default(),
            ticker_paused: false,
            last_ticker_step: now,
            start_time: now,
        }
    }

    fn set_section(&mut self, section: Section) {
        if self.section != section {
            debug!("Section: {:?} -> {:?}", self.section, section);
            self.section = section;
            self.projects.detail_open = false;
        }
    }

    /// Advances the ticker by whole steps since the last call.
    fn advance_ticker(&mut self, now: Instant) {
        if self.ticker_paused {
            self.last_ticker_step = now;
            return;
        }
        while now.duration_since(self.last_ticker_step) >= TICKER_STEP {
            self.ticker_offset = self.ticker_offset.wrapping_add(1);
            self.last_ticker_step += TICKER_STEP;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the Gemini provider from resolved credentials.
///
/// A missing key is not fatal: the provider reports a config error on every
/// request and the chat shows its fixed failure line.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn CompletionProvider> {
    if config.gemini_api_key.is_none() {
        warn!("No Gemini API key configured; chat requests will fail");
    }
    Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone(),
        Some(config.gemini_base_url.clone()),
    ))
}

pub fn run(config: ResolvedConfig, content: PortfolioContent) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, content, &config, Instant::now())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let mut tui = TuiState::new(app.content.projects.len());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    // Token for the request currently in flight
    let mut active_request: Option<CancellationToken> = None;

    let mut should_quit = false;
    while !should_quit {
        let now = Instant::now();
        update(&mut app, Action::Tick(now));
        tui.advance_ticker(now);

        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;

        let timeout = app
            .typewriter
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(FRAME))
            .unwrap_or(FRAME);
        let first_event = poll_event_timeout(timeout);

        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(&mut app, &mut tui, &event);
            if apply_effect(effect, &app, &tx, &mut active_request) {
                should_quit = true;
                break;
            }
        }

        // Handle background task actions (streaming responses)
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &tx, &mut active_request) {
                should_quit = true;
            }
        }
    }

    if let Some(token) = active_request.take() {
        token.cancel();
    }
    ratatui::restore();
    info!("Folio shut down");
    Ok(())
}

/// Performs an effect's I/O. Returns true when the loop should exit.
fn apply_effect(
    effect: Effect,
    app: &App,
    tx: &mpsc::Sender<Action>,
    active_request: &mut Option<CancellationToken>,
) -> bool {
    match effect {
        Effect::Quit => {
            if let Some(token) = active_request.take() {
                token.cancel();
            }
            true
        }
        Effect::SpawnRequest(request) => {
            *active_request = Some(spawn_request(app, request, tx.clone()));
            false
        }
        Effect::CancelRequest(id) => {
            info!("Cancelling request {}", id.value());
            if let Some(token) = active_request.take() {
                token.cancel();
            }
            false
        }
        Effect::None | Effect::Redraw => false,
    }
}

/// Routes one terminal event to the focused component and the core.
fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        TuiEvent::ToggleChat => {
            tui.chat_open = !tui.chat_open;
            return Effect::Redraw;
        }
        TuiEvent::Resize => return Effect::Redraw,
        TuiEvent::MouseMove(col, row) => {
            tui.ticker_paused = tui.ticker_area.contains(Position::new(*col, *row));
        }
        _ => {}
    }

    if tui.chat_open {
        handle_chat_event(app, tui, event)
    } else {
        handle_section_event(app, tui, event)
    }
}

fn handle_chat_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        TuiEvent::Escape if app.chat.is_busy() => return update(app, Action::CancelGeneration),
        TuiEvent::Escape => {
            tui.chat_open = false;
            return Effect::Redraw;
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::CursorUp
        | TuiEvent::CursorDown => {
            tui.chat_panel.handle_event(event);
            return Effect::Redraw;
        }
        _ => {}
    }

    tui.input_box.locked = app.chat.is_busy();
    match tui.input_box.handle_event(event) {
        Some(InputEvent::ContentChanged) => {
            update(app, Action::InputChanged(tui.input_box.buffer.clone()))
        }
        Some(InputEvent::Submit(text)) => {
            update(app, Action::InputChanged(text));
            let effect = update(app, Action::Submit);
            if matches!(effect, Effect::SpawnRequest(_)) {
                tui.input_box.clear();
                tui.chat_panel.stick_to_bottom = true;
            }
            effect
        }
        None => Effect::None,
    }
}

fn handle_section_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        TuiEvent::NextSection => {
            tui.set_section(tui.section.next());
            return Effect::Redraw;
        }
        TuiEvent::PrevSection => {
            tui.set_section(tui.section.prev());
            return Effect::Redraw;
        }
        TuiEvent::InputChar('q') if !tui.projects.detail_open => return update(app, Action::Quit),
        TuiEvent::InputChar(c @ '1'..='5') => {
            let index = (*c as usize) - ('1' as usize);
            tui.set_section(Section::ALL[index]);
            return Effect::Redraw;
        }
        _ => {}
    }

    match tui.section {
        Section::Journey => match event {
            TuiEvent::MouseMove(col, row) | TuiEvent::MouseClick(col, row) => {
                match tui.journey_layout.hit_test(*col, *row) {
                    Some((source, id)) => update(app, Action::Hover { source, id }),
                    None => Effect::None,
                }
            }
            TuiEvent::CursorRight | TuiEvent::CursorDown => update(app, Action::HoverNext),
            TuiEvent::CursorLeft | TuiEvent::CursorUp => update(app, Action::HoverPrev),
            TuiEvent::Escape => update(
                app,
                Action::Hover {
                    source: HoverSource::Map,
                    id: None,
                },
            ),
            _ => Effect::None,
        },
        Section::Projects => match tui.projects.handle_event(event) {
            Some(ProjectsEvent::Opened(index)) => {
                debug!("Opened project {}", index);
                Effect::Redraw
            }
            Some(ProjectsEvent::SelectionChanged(index)) => {
                debug!("Selected project {}", index);
                Effect::Redraw
            }
            Some(ProjectsEvent::Closed) => Effect::Redraw,
            None => Effect::None,
        },
        Section::Hero | Section::Credentials | Section::Contact => Effect::None,
    }
}

/// Spawns the request on a tokio task and returns its cancellation token.
///
/// Chunks are forwarded as `ResponseChunk` actions while the provider
/// streams. The terminal action (`ResponseDone` or `ResponseFailed`) is sent
/// only after every chunk has been forwarded. A cancelled request sends
/// nothing further; the session already settled it.
fn spawn_request(
    app: &App,
    request: OutboundRequest,
    tx: mpsc::Sender<Action>,
) -> CancellationToken {
    let id = request.id;
    info!(
        "Spawning request {} via {} (model={})",
        id.value(),
        app.provider.name(),
        app.model_name
    );

    let provider = app.provider.clone();
    let model = app.model_name.clone();
    let system_prompt = app.system_prompt.clone();
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let (chunk_tx, mut chunk_rx) = tokio::sync::mpsc::channel::<StreamChunk>(100);

    tokio::spawn(async move {
        let completion = CompletionRequest {
            prompt: &request.prompt,
            model: &model,
            system_instruction: &system_prompt,
        };

        let forward = async {
            let mut forwarded = 0usize;
            while let Some(chunk) = chunk_rx.recv().await {
                match chunk {
                    StreamChunk::Text(text) => {
                        forwarded += text.len();
                        if tx.send(Action::ResponseChunk { id, text }).is_err() {
                            warn!("Failed to forward ResponseChunk: receiver dropped");
                            break;
                        }
                    }
                    StreamChunk::Finished(reason) => {
                        debug!("Request {} finished: {}", id.value(), reason);
                    }
                }
            }
            forwarded
        };

        let (result, forwarded) =
            tokio::join!(provider.stream_completion(completion, chunk_tx, token), forward);

        let action = match result {
            Ok(()) => {
                info!("Request {} complete: {} bytes", id.value(), forwarded);
                Action::ResponseDone { id }
            }
            Err(ProviderError::Cancelled) => {
                info!("Request {} cancelled", id.value());
                return;
            }
            Err(e) => Action::ResponseFailed {
                id,
                error: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send completion for request {}: receiver dropped", id.value());
        }
    });

    cancel
}
