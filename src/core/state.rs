//! # Chat State
//!
//! Everything the chat component owns, in one place. No TUI types here:
//! scroll position and the input buffer live in the `tui` module.
//!
//! ```text
//! ChatSession
//! ├── api: Arc<dyn ConversationApi>   // endpoint client
//! ├── session_id: SessionId           // fixed for the whole mount
//! ├── user_id: String                 // sent with every request
//! ├── messages: Vec<ChatMessage>      // append-only transcript
//! ├── in_flight: usize                // requests not yet settled
//! ├── clear_input: ClearInputPolicy   // when the text field is emptied
//! ├── title: String                   // page title
//! └── status_message: String          // title bar status text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::conversation::ConversationApi;
use crate::core::config::ResolvedConfig;
use crate::core::session_id::SessionId;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    User,
    Bot,
}

/// One entry in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub source: Source,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            source: Source::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            source: Source::Bot,
            text: text.into(),
        }
    }
}

/// When the input field is emptied after a submission.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClearInputPolicy {
    /// Cleared once the request resolves or fails.
    #[default]
    OnSettle,
    /// Cleared as soon as the submission is accepted.
    OnSubmit,
}

pub struct ChatSession {
    pub api: Arc<dyn ConversationApi>,
    pub session_id: SessionId,
    pub user_id: String,
    pub messages: Vec<ChatMessage>,
    pub in_flight: usize,
    pub clear_input: ClearInputPolicy,
    pub title: String,
    pub status_message: String,
    /// Monotonic id handed to each outbound request, for log correlation.
    pub(crate) next_request_id: u64,
}

impl ChatSession {
    /// Mount a new chat component: fresh session id, empty transcript.
    pub fn from_config(api: Arc<dyn ConversationApi>, config: &ResolvedConfig) -> Self {
        Self {
            api,
            session_id: SessionId::generate(),
            user_id: config.user_id.clone(),
            messages: Vec::new(),
            in_flight: 0,
            clear_input: config.clear_input,
            title: config.title.clone(),
            status_message: String::new(),
            next_request_id: 0,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_session;

    use super::*;

    #[test]
    fn new_session_starts_empty() {
        let session = test_session();
        assert!(session.messages.is_empty());
        assert_eq!(session.in_flight, 0);
        assert!(!session.is_waiting());
        assert_eq!(session.user_id, "demo_user");
        assert_eq!(session.title, "AI Customer Support");
        assert_eq!(session.clear_input, ClearInputPolicy::OnSettle);
    }

    #[test]
    fn each_mount_gets_its_own_session_id() {
        let a = test_session();
        let b = test_session();
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn clear_policy_parses_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: ClearInputPolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"on_submit\"").unwrap();
        assert_eq!(w.policy, ClearInputPolicy::OnSubmit);
        let w: Wrapper = toml::from_str("policy = \"on_settle\"").unwrap();
        assert_eq!(w.policy, ClearInputPolicy::OnSettle);
    }
}
