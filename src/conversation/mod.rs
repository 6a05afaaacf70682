//! # Conversation Client
//!
//! Talks to the external conversations service. One request per user
//! submission, no retries, no streaming.
//!
//! - [`types`]: wire types and the reply-text mapping
//! - [`api`]: the `ConversationApi` seam and its error type
//! - [`http`]: the reqwest implementation

pub mod api;
pub mod http;
pub mod types;

pub use api::{ClientError, ConversationApi};
pub use http::{DEFAULT_ENDPOINT, HttpConversationClient};
pub use types::{
    BotMessage, CONNECTION_ERROR_TEXT, ConversationRequest, ConversationResponse, DEFAULT_USER_ID,
    NO_RESPONSE_TEXT, Payload,
};
