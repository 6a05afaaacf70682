use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reply text used when a successful response carries no usable message.
pub const NO_RESPONSE_TEXT: &str = "No response";
/// Reply text used when the request fails for any reason.
pub const CONNECTION_ERROR_TEXT: &str = "Error connecting to AI.";

/// Placeholder user id sent with every request unless configured.
pub const DEFAULT_USER_ID: &str = "demo_user";

/// The user's text, wrapped the way the endpoint expects it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Payload {
    pub content: String,
}

/// Body of `POST /v1/conversations`.
///
/// `context` is always sent as an empty object.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ConversationRequest {
    pub session_id: String,
    pub user_id: String,
    pub payload: Payload,
    pub context: Map<String, Value>,
}

impl ConversationRequest {
    pub fn new(session_id: &str, user_id: &str, content: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            user_id: user_id.to_string(),
            payload: Payload {
                content: content.to_string(),
            },
            context: Map::new(),
        }
    }
}

/// A message returned by the server.
///
/// Every field is optional so a partial message still parses.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BotMessage {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Response body of `POST /v1/conversations`.
///
/// Only `messages[0].text` drives the UI; the other fields are logged.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConversationResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<BotMessage>>,
    #[serde(default)]
    pub context: Option<Map<String, Value>>,
}

impl ConversationResponse {
    /// Text of the first message, or [`NO_RESPONSE_TEXT`] when absent.
    pub fn reply_text(&self) -> String {
        self.messages
            .as_deref()
            .and_then(|messages| messages.first())
            .and_then(|message| message.text.clone())
            .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string())
    }
}
