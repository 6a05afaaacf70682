use std::fmt;

use async_trait::async_trait;

use super::types::{ConversationRequest, ConversationResponse};

/// Errors that can occur while talking to the conversations endpoint.
///
/// The UI surfaces all of them the same way; the variants exist for logging.
#[derive(Debug)]
pub enum ClientError {
    /// Client misconfigured (bad endpoint URL, TLS setup). Raised at startup.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Endpoint answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Config(msg) => write!(f, "config error: {msg}"),
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Something that can carry one conversation turn to the server.
///
/// One call is one best-effort attempt: implementations never retry.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Endpoint description for logs and the title bar.
    fn endpoint(&self) -> &str;

    async fn send(&self, request: &ConversationRequest)
    -> Result<ConversationResponse, ClientError>;
}
