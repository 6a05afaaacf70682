//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::conversation::{
    BotMessage, ClientError, ConversationApi, ConversationRequest, ConversationResponse,
};
use crate::core::config::{CliOverrides, ChatConfig, EnvOverrides, ResolvedConfig, resolve};
use crate::core::state::ChatSession;

/// What the stub answers with.
pub enum StubReply {
    Text(String),
    Empty,
    Fail,
}

/// An in-memory `ConversationApi` that records every request it sees.
pub struct StubApi {
    pub reply: StubReply,
    pub requests: Mutex<Vec<ConversationRequest>>,
}

impl StubApi {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ConversationApi for StubApi {
    fn endpoint(&self) -> &str {
        "stub://conversations"
    }

    async fn send(
        &self,
        request: &ConversationRequest,
    ) -> Result<ConversationResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            StubReply::Text(text) => Ok(ConversationResponse {
                messages: Some(vec![BotMessage {
                    text: Some(text.clone()),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            StubReply::Empty => Ok(ConversationResponse::default()),
            StubReply::Fail => Err(ClientError::Network("connection refused".to_string())),
        }
    }
}

/// Default settings, untouched by the real environment.
pub fn test_config() -> ResolvedConfig {
    resolve(
        &ChatConfig::default(),
        &EnvOverrides::default(),
        &CliOverrides::default(),
    )
}

/// Creates a test session backed by a stub that answers "Hi".
pub fn test_session() -> ChatSession {
    ChatSession::from_config(
        Arc::new(StubApi::new(StubReply::Text("Hi".to_string()))),
        &test_config(),
    )
}
