//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the page,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (smooth scroll, replies pending): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, replies or
//!   terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

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

use crate::conversation::{ConversationApi, ConversationRequest, HttpConversationClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::ChatSession;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core chat logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is ignored by terminals that don't support it
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
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
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

/// Build the HTTP client for the configured endpoint.
pub fn build_client(config: &ResolvedConfig) -> std::io::Result<Arc<dyn ConversationApi>> {
    let client = HttpConversationClient::new(config.endpoint.clone(), config.request_timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    Ok(Arc::new(client))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api = build_client(&config)?;
    let mut session = ChatSession::from_config(api, &config);
    let mut tui = TuiState::new();
    info!(
        "Chat mounted (session_id={}, user_id={}, endpoint={})",
        session.session_id,
        session.user_id,
        session.api.endpoint()
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Replies from background requests
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.input_box.busy = session.is_waiting();

        let animating = tui.message_list.is_animating() || session.is_waiting();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &session, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    if apply_effect(update(&mut session, Action::Quit), &session, &mut tui, &tx) {
                        break 'main;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }
                _ => {
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                        let effect = update(&mut session, Action::Submit(text));
                        if apply_effect(effect, &session, &mut tui, &tx) {
                            break 'main;
                        }
                    }
                }
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut session, action);
            if apply_effect(effect, &session, &mut tui, &tx) {
                break 'main;
            }
        }
    }

    info!(
        "Chat unmounted ({} messages, {} replies still pending)",
        session.messages.len(),
        session.in_flight
    );
    ratatui::restore();
    Ok(())
}

/// Carry out an effect. Returns true when the loop should exit.
fn apply_effect(
    effect: Effect,
    session: &ChatSession,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::SpawnRequest {
            request_id,
            request,
            clear_input,
        } => {
            if clear_input {
                tui.input_box.clear();
            }
            spawn_request(session.api.clone(), request_id, request, tx.clone());
            false
        }
        Effect::ClearInput => {
            tui.input_box.clear();
            false
        }
        Effect::Quit => true,
    }
}

fn spawn_request(
    api: Arc<dyn ConversationApi>,
    request_id: u64,
    request: ConversationRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning conversation request (request_id={})", request_id);
    tokio::spawn(async move {
        let action = run_exchange(api.as_ref(), request_id, &request).await;
        if tx.send(action).is_err() {
            // The chat was unmounted; the reply has nowhere to go.
            debug!("Dropping reply for request_id={}: receiver gone", request_id);
        }
    });
}

/// One request/response round trip, mapped to the action that settles it.
async fn run_exchange(
    api: &dyn ConversationApi,
    request_id: u64,
    request: &ConversationRequest,
) -> Action {
    let started = Instant::now();
    match api.send(request).await {
        Ok(response) => {
            debug!(
                "request_id={} answered in {}ms",
                request_id,
                started.elapsed().as_millis()
            );
            Action::ReplyReceived {
                request_id,
                text: response.reply_text(),
            }
        }
        Err(e) => {
            warn!("request_id={} failed after {}ms: {}", request_id, started.elapsed().as_millis(), e);
            Action::RequestFailed {
                request_id,
                error: e.to_string(),
            }
        }
    }
}
