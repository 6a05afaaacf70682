//! # Actions
//!
//! Everything that can happen to the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Server answers? That's `Action::ReplyReceived { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter has to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use log::{debug, info, warn};

use crate::conversation::{CONNECTION_ERROR_TEXT, ConversationRequest};
use crate::core::state::{ChatMessage, ChatSession, ClearInputPolicy};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user submitted the current input field value.
    Submit(String),
    /// A request settled successfully; `text` is already mapped from the response.
    ReplyReceived { request_id: u64, text: String },
    /// A request failed (transport, HTTP status or body).
    RequestFailed { request_id: u64, error: String },
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Dispatch one request. `clear_input` asks the adapter to empty the field now.
    SpawnRequest {
        request_id: u64,
        request: ConversationRequest,
        clear_input: bool,
    },
    /// Empty the input field.
    ClearInput,
    Quit,
}

pub fn update(session: &mut ChatSession, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }

            session.messages.push(ChatMessage::user(text.clone()));

            let request_id = session.next_request_id;
            session.next_request_id += 1;
            session.in_flight += 1;
            session.status_message = waiting_status(session.in_flight);

            info!(
                "Submitted message #{} (request_id={}, in_flight={})",
                session.messages.len(),
                request_id,
                session.in_flight
            );

            Effect::SpawnRequest {
                request_id,
                request: ConversationRequest::new(
                    session.session_id.as_str(),
                    &session.user_id,
                    &text,
                ),
                clear_input: session.clear_input == ClearInputPolicy::OnSubmit,
            }
        }
        Action::ReplyReceived { request_id, text } => {
            debug!("Reply for request_id={} ({} bytes)", request_id, text.len());
            session.messages.push(ChatMessage::bot(text));
            settle(session)
        }
        Action::RequestFailed { request_id, error } => {
            warn!("Request {} failed: {}", request_id, error);
            session.messages.push(ChatMessage::bot(CONNECTION_ERROR_TEXT));
            settle(session)
        }
        Action::Quit => Effect::Quit,
    }
}

/// Bookkeeping shared by both settle paths.
fn settle(session: &mut ChatSession) -> Effect {
    session.in_flight = session.in_flight.saturating_sub(1);
    session.status_message = waiting_status(session.in_flight);

    match session.clear_input {
        ClearInputPolicy::OnSettle => Effect::ClearInput,
        ClearInputPolicy::OnSubmit => Effect::None,
    }
}

fn waiting_status(in_flight: usize) -> String {
    match in_flight {
        0 => String::new(),
        1 => "Waiting for reply...".to_string(),
        n => format!("Waiting for {n} replies..."),
    }
}
